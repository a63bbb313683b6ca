use thiserror::Error;

/// Error for SongId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SongIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for song field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SongFieldError {
    #[error("Song title is required")]
    EmptyTitle,

    #[error("Artist name is required")]
    EmptyArtist,

    #[error("Release year must be between {min} and {max}, got {actual}")]
    ReleaseYearOutOfRange { min: i32, max: i32, actual: i32 },

    #[error("Duration must be non-negative, got {actual}")]
    NegativeDuration { actual: i32 },
}

/// Top-level error for catalog operations
#[derive(Debug, Clone, Error)]
pub enum SongError {
    #[error("Invalid song ID: {0}")]
    InvalidSongId(#[from] SongIdError),

    #[error("Invalid song field: {0}")]
    InvalidField(#[from] SongFieldError),

    #[error("Song not found: {0}")]
    NotFound(String),

    #[error("Only the account that created a song may modify it")]
    Forbidden,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
