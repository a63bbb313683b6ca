use std::fmt;

use chrono::DateTime;
use chrono::Datelike;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::song::errors::SongFieldError;
use crate::domain::song::errors::SongIdError;

/// Song unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SongId(pub Uuid);

impl SongId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a song ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SongIdError> {
        Uuid::parse_str(s)
            .map(SongId)
            .map_err(|e| SongIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SongId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Song title value type; trimmed, non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongTitle(String);

impl SongTitle {
    pub fn new(title: String) -> Result<Self, SongFieldError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            Err(SongFieldError::EmptyTitle)
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Artist name value type; trimmed, non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistName(String);

impl ArtistName {
    pub fn new(artist: String) -> Result<Self, SongFieldError> {
        let artist = artist.trim().to_string();
        if artist.is_empty() {
            Err(SongFieldError::EmptyArtist)
        } else {
            Ok(Self(artist))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtistName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Release year within [1900, current year].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseYear(i32);

impl ReleaseYear {
    const MIN: i32 = 1900;

    pub fn new(year: i32) -> Result<Self, SongFieldError> {
        let max = Utc::now().year();
        if year < Self::MIN || year > max {
            Err(SongFieldError::ReleaseYearOutOfRange {
                min: Self::MIN,
                max,
                actual: year,
            })
        } else {
            Ok(Self(year))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Track duration in whole seconds, non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSeconds(i32);

impl DurationSeconds {
    pub fn new(seconds: i32) -> Result<Self, SongFieldError> {
        if seconds < 0 {
            Err(SongFieldError::NegativeDuration { actual: seconds })
        } else {
            Ok(Self(seconds))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Song aggregate entity.
#[derive(Debug, Clone)]
pub struct Song {
    pub id: SongId,
    pub title: SongTitle,
    pub artist: ArtistName,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub duration_seconds: Option<DurationSeconds>,
    pub release_year: Option<ReleaseYear>,
    pub audio_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub created_by: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command to add a song to the catalog with validated fields
#[derive(Debug)]
pub struct CreateSongCommand {
    pub title: SongTitle,
    pub artist: ArtistName,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub duration_seconds: Option<DurationSeconds>,
    pub release_year: Option<ReleaseYear>,
    pub audio_url: Option<String>,
    pub cover_image_url: Option<String>,
}

/// Command for a full or partial song update.
///
/// Only provided fields change; `None` leaves the stored value alone.
#[derive(Debug, Default)]
pub struct UpdateSongCommand {
    pub title: Option<SongTitle>,
    pub artist: Option<ArtistName>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub duration_seconds: Option<DurationSeconds>,
    pub release_year: Option<ReleaseYear>,
    pub audio_url: Option<String>,
    pub cover_image_url: Option<String>,
}

/// Catalog attributes the listing may sort by.
///
/// A closed allow-list: unknown sort keys from the client fall back to
/// `Title` rather than reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SongSortField {
    Title,
    Artist,
    Album,
    ReleaseYear,
    CreatedAt,
}

impl SongSortField {
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "title" => Self::Title,
            "artist" => Self::Artist,
            "album" => Self::Album,
            "releaseYear" | "release_year" => Self::ReleaseYear,
            "createdAt" | "created_at" => Self::CreatedAt,
            _ => Self::Title,
        }
    }

    /// Column name used by the SQL repository; safe by construction.
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::ReleaseYear => "release_year",
            Self::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Ascending unless explicitly "desc".
    pub fn parse_or_default(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

/// Parameters of one catalog listing request.
///
/// Doubles as the memoization key for the listing cache, so it derives
/// `Hash`/`Eq` over every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SongPageQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub sort_field: SongSortField,
    pub sort_direction: SortDirection,
}

impl SongPageQuery {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Offset of the first item of this page.
    ///
    /// Widened to u64 so a large client-supplied page/size pair cannot
    /// overflow.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

impl Default for SongPageQuery {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            page_size: Self::DEFAULT_PAGE_SIZE,
            search: None,
            sort_field: SongSortField::Title,
            sort_direction: SortDirection::Ascending,
        }
    }
}

/// One page of catalog listing results.
#[derive(Debug, Clone)]
pub struct SongPage {
    pub items: Vec<Song>,
    pub page: u32,
    pub total_pages: u64,
    pub total_items: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_artist_reject_blank() {
        assert_eq!(
            SongTitle::new("   ".to_string()),
            Err(SongFieldError::EmptyTitle)
        );
        assert_eq!(
            ArtistName::new("".to_string()),
            Err(SongFieldError::EmptyArtist)
        );
        assert_eq!(
            SongTitle::new("  Bohemian Rhapsody ".to_string())
                .unwrap()
                .as_str(),
            "Bohemian Rhapsody"
        );
    }

    #[test]
    fn test_release_year_bounds() {
        assert!(ReleaseYear::new(1899).is_err());
        assert!(ReleaseYear::new(1900).is_ok());
        assert!(ReleaseYear::new(Utc::now().year()).is_ok());
        assert!(ReleaseYear::new(Utc::now().year() + 1).is_err());
    }

    #[test]
    fn test_duration_non_negative() {
        assert!(DurationSeconds::new(0).is_ok());
        assert!(DurationSeconds::new(-1).is_err());
    }

    #[test]
    fn test_sort_field_allow_list() {
        assert_eq!(
            SongSortField::parse_or_default("artist"),
            SongSortField::Artist
        );
        // Anything outside the allow-list falls back to title.
        assert_eq!(
            SongSortField::parse_or_default("password_hash; DROP TABLE songs"),
            SongSortField::Title
        );
    }

    #[test]
    fn test_sort_direction_default() {
        assert_eq!(
            SortDirection::parse_or_default("desc"),
            SortDirection::Descending
        );
        assert_eq!(
            SortDirection::parse_or_default("DESC"),
            SortDirection::Descending
        );
        assert_eq!(
            SortDirection::parse_or_default("sideways"),
            SortDirection::Ascending
        );
    }

    #[test]
    fn test_query_offset() {
        let query = SongPageQuery {
            page: 3,
            page_size: 10,
            ..Default::default()
        };
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn test_query_offset_does_not_overflow() {
        let query = SongPageQuery {
            page: 3,
            page_size: u32::MAX,
            ..Default::default()
        };
        assert_eq!(query.offset(), 2 * u32::MAX as u64);
    }
}
