use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::playlist::errors::PlaylistError;
use crate::domain::playlist::models::CreatePlaylistCommand;
use crate::domain::playlist::models::Playlist;
use crate::domain::playlist::models::PlaylistId;
use crate::domain::playlist::models::UpdatePlaylistCommand;
use crate::domain::song::models::SongId;

/// Port for playlist operations.
///
/// Every operation except creation is owner-checked: the acting account
/// must equal the playlist's owner. Existence is checked first, so a
/// missing playlist reports `NotFound` rather than `Forbidden`.
#[async_trait]
pub trait PlaylistServicePort: Send + Sync + 'static {
    /// Create a playlist owned by the acting account.
    async fn create_playlist(
        &self,
        command: CreatePlaylistCommand,
        owner: AccountId,
    ) -> Result<Playlist, PlaylistError>;

    /// List the acting account's playlists, newest first.
    async fn list_playlists(&self, owner: AccountId) -> Result<Vec<Playlist>, PlaylistError>;

    /// Read one playlist.
    ///
    /// # Errors
    /// * `NotFound` / `Forbidden`
    async fn get_playlist(
        &self,
        id: &PlaylistId,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError>;

    /// Rename or re-describe a playlist.
    ///
    /// # Errors
    /// * `NotFound` / `Forbidden`
    async fn update_playlist(
        &self,
        id: &PlaylistId,
        command: UpdatePlaylistCommand,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError>;

    /// Delete a playlist.
    ///
    /// # Errors
    /// * `NotFound` / `Forbidden`
    async fn delete_playlist(&self, id: &PlaylistId, acting: AccountId)
        -> Result<(), PlaylistError>;

    /// Append a song to the playlist.
    ///
    /// # Errors
    /// * `DuplicateSong` - Song is already a member
    /// * `NotFound` / `Forbidden`
    async fn add_song(
        &self,
        id: &PlaylistId,
        song_id: SongId,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError>;

    /// Remove a song from the playlist.
    ///
    /// # Errors
    /// * `SongNotInPlaylist` - Song is not a member
    /// * `NotFound` / `Forbidden`
    async fn remove_song(
        &self,
        id: &PlaylistId,
        song_id: SongId,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError>;

    /// Replace the song sequence with a permutation of itself.
    ///
    /// # Errors
    /// * `InvalidReorder` - Proposed order is not a permutation of the
    ///   current members
    /// * `NotFound` / `Forbidden`
    async fn reorder_songs(
        &self,
        id: &PlaylistId,
        ordered_song_ids: Vec<SongId>,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError>;
}

/// Persistence operations for the playlist aggregate.
///
/// Whole-aggregate reads and writes; concurrent membership mutations are
/// last-write-wins at the store.
#[async_trait]
pub trait PlaylistRepository: Send + Sync + 'static {
    /// Persist a new playlist.
    async fn create(&self, playlist: Playlist) -> Result<Playlist, PlaylistError>;

    /// Retrieve a playlist by identifier.
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>, PlaylistError>;

    /// Retrieve an account's playlists, newest first.
    async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<Playlist>, PlaylistError>;

    /// Update an existing playlist (fields and membership).
    ///
    /// # Errors
    /// * `NotFound` - Playlist does not exist
    async fn update(&self, playlist: Playlist) -> Result<Playlist, PlaylistError>;

    /// Remove a playlist.
    ///
    /// # Errors
    /// * `NotFound` - Playlist does not exist
    async fn delete(&self, id: &PlaylistId) -> Result<(), PlaylistError>;
}
