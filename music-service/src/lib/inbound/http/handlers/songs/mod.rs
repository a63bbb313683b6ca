use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::song::models::Song;
use crate::domain::song::models::SongId;
use crate::domain::song::models::SongPage;
use crate::inbound::http::handlers::ApiError;

pub mod create_song;
pub mod delete_song;
pub mod get_song;
pub mod list_songs;
pub mod search_songs;
pub mod update_song;

/// Catalog entry as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongData {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Track length in whole seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Song> for SongData {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id.to_string(),
            title: song.title.to_string(),
            artist: song.artist.to_string(),
            album: song.album.clone(),
            genre: song.genre.clone(),
            duration: song.duration_seconds.map(|d| d.value()),
            release_year: song.release_year.map(|y| y.value()),
            audio_url: song.audio_url.clone(),
            cover_image_url: song.cover_image_url.clone(),
            created_by: song.created_by.to_string(),
            created_at: song.created_at,
            updated_at: song.updated_at,
        }
    }
}

/// One page of the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPageData {
    pub songs: Vec<SongData>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_songs: u64,
}

impl From<&SongPage> for SongPageData {
    fn from(page: &SongPage) -> Self {
        Self {
            songs: page.items.iter().map(SongData::from).collect(),
            current_page: page.page,
            total_pages: page.total_pages,
            total_songs: page.total_items,
        }
    }
}

/// Parse a song ID out of a path segment.
pub(super) fn parse_song_id(raw: &str) -> Result<SongId, ApiError> {
    SongId::from_string(raw).map_err(|_| ApiError::BadRequest("Invalid song id".to_string()))
}
