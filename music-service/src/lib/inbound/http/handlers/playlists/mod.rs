use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::playlist::models::Playlist;
use crate::domain::playlist::models::PlaylistId;
use crate::domain::song::models::SongId;
use crate::inbound::http::handlers::ApiError;

pub mod add_song;
pub mod create_playlist;
pub mod delete_playlist;
pub mod get_playlist;
pub mod list_playlists;
pub mod remove_song;
pub mod reorder_songs;
pub mod update_playlist;

/// Playlist as exposed to clients. The `user` field carries the owning
/// account's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistData {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user: String,
    pub songs: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Playlist> for PlaylistData {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.to_string(),
            name: playlist.name.to_string(),
            description: playlist.description.clone(),
            user: playlist.owner.to_string(),
            songs: playlist.songs.iter().map(SongId::to_string).collect(),
            created_at: playlist.created_at,
            updated_at: playlist.updated_at,
        }
    }
}

/// Parse a playlist ID out of a path segment.
pub(super) fn parse_playlist_id(raw: &str) -> Result<PlaylistId, ApiError> {
    PlaylistId::from_string(raw)
        .map_err(|_| ApiError::BadRequest("Invalid playlist id".to_string()))
}

/// Parse a song ID appearing in a playlist route.
pub(super) fn parse_member_song_id(raw: &str) -> Result<SongId, ApiError> {
    SongId::from_string(raw).map_err(|_| ApiError::BadRequest("Invalid song id".to_string()))
}
