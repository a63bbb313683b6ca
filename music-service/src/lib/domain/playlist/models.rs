use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::playlist::errors::PlaylistIdError;
use crate::domain::playlist::errors::PlaylistNameError;
use crate::domain::song::models::SongId;

/// Playlist unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaylistId(pub Uuid);

impl PlaylistId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a playlist ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PlaylistIdError> {
        Uuid::parse_str(s)
            .map(PlaylistId)
            .map_err(|e| PlaylistIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PlaylistId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Playlist name value type; trimmed, non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistName(String);

impl PlaylistName {
    pub fn new(name: String) -> Result<Self, PlaylistNameError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            Err(PlaylistNameError::Empty)
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Playlist aggregate entity.
///
/// The owner is fixed at creation; `songs` is an ordered,
/// duplicate-free sequence.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: PlaylistName,
    pub description: Option<String>,
    pub owner: AccountId,
    pub songs: Vec<SongId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command to create a playlist with validated fields
#[derive(Debug)]
pub struct CreatePlaylistCommand {
    pub name: PlaylistName,
    pub description: Option<String>,
}

/// Command to rename or re-describe a playlist.
#[derive(Debug, Default)]
pub struct UpdatePlaylistCommand {
    pub name: Option<PlaylistName>,
    pub description: Option<String>,
}
