use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::playlist::errors::PlaylistError;
use crate::domain::playlist::models::CreatePlaylistCommand;
use crate::domain::playlist::models::Playlist;
use crate::domain::playlist::models::PlaylistId;
use crate::domain::playlist::models::UpdatePlaylistCommand;
use crate::domain::playlist::ports::PlaylistRepository;
use crate::domain::playlist::ports::PlaylistServicePort;
use crate::domain::song::models::SongId;

/// Domain service for playlists and their song membership.
pub struct PlaylistService<PR>
where
    PR: PlaylistRepository,
{
    repository: Arc<PR>,
}

impl<PR> PlaylistService<PR>
where
    PR: PlaylistRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    /// Load a playlist and enforce the owner check.
    async fn load_owned(
        &self,
        id: &PlaylistId,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError> {
        let playlist = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PlaylistError::NotFound(id.to_string()))?;

        if playlist.owner != acting {
            return Err(PlaylistError::Forbidden);
        }

        Ok(playlist)
    }
}

#[async_trait]
impl<PR> PlaylistServicePort for PlaylistService<PR>
where
    PR: PlaylistRepository,
{
    async fn create_playlist(
        &self,
        command: CreatePlaylistCommand,
        owner: AccountId,
    ) -> Result<Playlist, PlaylistError> {
        let now = Utc::now();
        let playlist = Playlist {
            id: PlaylistId::new(),
            name: command.name,
            description: command.description,
            owner,
            songs: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.repository.create(playlist).await
    }

    async fn list_playlists(&self, owner: AccountId) -> Result<Vec<Playlist>, PlaylistError> {
        self.repository.find_by_owner(&owner).await
    }

    async fn get_playlist(
        &self,
        id: &PlaylistId,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError> {
        self.load_owned(id, acting).await
    }

    async fn update_playlist(
        &self,
        id: &PlaylistId,
        command: UpdatePlaylistCommand,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError> {
        let mut playlist = self.load_owned(id, acting).await?;

        if let Some(name) = command.name {
            playlist.name = name;
        }
        if let Some(description) = command.description {
            playlist.description = Some(description);
        }
        playlist.updated_at = Utc::now();

        self.repository.update(playlist).await
    }

    async fn delete_playlist(
        &self,
        id: &PlaylistId,
        acting: AccountId,
    ) -> Result<(), PlaylistError> {
        self.load_owned(id, acting).await?;
        self.repository.delete(id).await
    }

    async fn add_song(
        &self,
        id: &PlaylistId,
        song_id: SongId,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError> {
        let mut playlist = self.load_owned(id, acting).await?;

        // Server-side duplicate check regardless of any client hinting.
        if playlist.songs.contains(&song_id) {
            return Err(PlaylistError::DuplicateSong(song_id.to_string()));
        }

        playlist.songs.push(song_id);
        playlist.updated_at = Utc::now();

        self.repository.update(playlist).await
    }

    async fn remove_song(
        &self,
        id: &PlaylistId,
        song_id: SongId,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError> {
        let mut playlist = self.load_owned(id, acting).await?;

        if !playlist.songs.contains(&song_id) {
            return Err(PlaylistError::SongNotInPlaylist(song_id.to_string()));
        }

        playlist.songs.retain(|member| *member != song_id);
        playlist.updated_at = Utc::now();

        self.repository.update(playlist).await
    }

    async fn reorder_songs(
        &self,
        id: &PlaylistId,
        ordered_song_ids: Vec<SongId>,
        acting: AccountId,
    ) -> Result<Playlist, PlaylistError> {
        let mut playlist = self.load_owned(id, acting).await?;

        // Same length plus set equality; membership is duplicate-free,
        // so together these make the proposed order a true permutation.
        let current: HashSet<SongId> = playlist.songs.iter().copied().collect();
        let proposed: HashSet<SongId> = ordered_song_ids.iter().copied().collect();
        if ordered_song_ids.len() != playlist.songs.len() || proposed != current {
            return Err(PlaylistError::InvalidReorder);
        }

        playlist.songs = ordered_song_ids;
        playlist.updated_at = Utc::now();

        self.repository.update(playlist).await
    }
}
