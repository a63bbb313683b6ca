use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::song::errors::SongError;
use crate::domain::song::models::CreateSongCommand;
use crate::domain::song::models::Song;
use crate::domain::song::models::SongId;
use crate::domain::song::models::SongPage;
use crate::domain::song::models::SongPageQuery;
use crate::domain::song::models::UpdateSongCommand;

/// Port for catalog operations.
#[async_trait]
pub trait SongServicePort: Send + Sync + 'static {
    /// Add a song to the catalog on behalf of an account.
    async fn create_song(
        &self,
        command: CreateSongCommand,
        created_by: AccountId,
    ) -> Result<Song, SongError>;

    /// Retrieve a single song.
    ///
    /// # Errors
    /// * `NotFound` - Song does not exist
    async fn get_song(&self, id: &SongId) -> Result<Song, SongError>;

    /// Paginated, filtered, sorted catalog listing.
    ///
    /// Results may be served from a short-lived cache; see
    /// [`crate::domain::song::cache::SongPageCache`] for the staleness
    /// contract.
    async fn list_songs(&self, query: SongPageQuery) -> Result<SongPage, SongError>;

    /// Case-insensitive substring search over title and artist,
    /// capped at a fixed number of results.
    async fn search_songs(&self, text: &str) -> Result<Vec<Song>, SongError>;

    /// Update a song. Only the creating account may modify it.
    ///
    /// # Errors
    /// * `NotFound` - Song does not exist
    /// * `Forbidden` - Acting account is not the creator
    async fn update_song(
        &self,
        id: &SongId,
        command: UpdateSongCommand,
        acting: AccountId,
    ) -> Result<Song, SongError>;

    /// Delete a song. Only the creating account may delete it.
    ///
    /// # Errors
    /// * `NotFound` - Song does not exist
    /// * `Forbidden` - Acting account is not the creator
    async fn delete_song(&self, id: &SongId, acting: AccountId) -> Result<(), SongError>;
}

/// Persistence operations for the song collection.
#[async_trait]
pub trait SongRepository: Send + Sync + 'static {
    /// Persist a new song.
    async fn create(&self, song: Song) -> Result<Song, SongError>;

    /// Retrieve a song by identifier.
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, SongError>;

    /// Fetch one page of songs for the given query.
    ///
    /// The returned order must be deterministic: the requested sort
    /// field/direction with id as the tie-break key.
    async fn list(&self, query: &SongPageQuery) -> Result<Vec<Song>, SongError>;

    /// Count songs matching the query's search text (all songs when
    /// `None`).
    async fn count(&self, search: Option<String>) -> Result<u64, SongError>;

    /// Case-insensitive substring search over title and artist.
    async fn search(&self, text: &str, limit: u32) -> Result<Vec<Song>, SongError>;

    /// Update an existing song.
    ///
    /// # Errors
    /// * `NotFound` - Song does not exist
    async fn update(&self, song: Song) -> Result<Song, SongError>;

    /// Remove a song.
    ///
    /// # Errors
    /// * `NotFound` - Song does not exist
    async fn delete(&self, id: &SongId) -> Result<(), SongError>;
}
