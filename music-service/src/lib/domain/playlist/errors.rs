use thiserror::Error;

/// Error for PlaylistId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaylistIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for PlaylistName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaylistNameError {
    #[error("Playlist name is required")]
    Empty,
}

/// Top-level error for playlist operations
#[derive(Debug, Clone, Error)]
pub enum PlaylistError {
    #[error("Invalid playlist ID: {0}")]
    InvalidPlaylistId(#[from] PlaylistIdError),

    #[error("Invalid playlist name: {0}")]
    InvalidName(#[from] PlaylistNameError),

    #[error("Playlist not found: {0}")]
    NotFound(String),

    #[error("Only the playlist owner may access it")]
    Forbidden,

    #[error("Song already in playlist: {0}")]
    DuplicateSong(String),

    #[error("Song not in playlist: {0}")]
    SongNotInPlaylist(String),

    #[error("Reorder must be a permutation of the current playlist members")]
    InvalidReorder,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
