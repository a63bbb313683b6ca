use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::song::cache::SongPageCache;
use crate::domain::song::errors::SongError;
use crate::domain::song::models::CreateSongCommand;
use crate::domain::song::models::Song;
use crate::domain::song::models::SongId;
use crate::domain::song::models::SongPage;
use crate::domain::song::models::SongPageQuery;
use crate::domain::song::models::UpdateSongCommand;
use crate::domain::song::ports::SongRepository;
use crate::domain::song::ports::SongServicePort;

const SEARCH_RESULT_LIMIT: u32 = 10;

/// Catalog query engine and song CRUD.
///
/// Generic over the repository for testability. Listing results are
/// memoized for five minutes per exact query tuple.
pub struct SongService<SR>
where
    SR: SongRepository,
{
    repository: Arc<SR>,
    page_cache: SongPageCache,
}

impl<SR> SongService<SR>
where
    SR: SongRepository,
{
    pub fn new(repository: Arc<SR>) -> Self {
        Self {
            repository,
            page_cache: SongPageCache::new(),
        }
    }
}

#[async_trait]
impl<SR> SongServicePort for SongService<SR>
where
    SR: SongRepository,
{
    async fn create_song(
        &self,
        command: CreateSongCommand,
        created_by: AccountId,
    ) -> Result<Song, SongError> {
        let now = Utc::now();
        let song = Song {
            id: SongId::new(),
            title: command.title,
            artist: command.artist,
            album: command.album,
            genre: command.genre,
            duration_seconds: command.duration_seconds,
            release_year: command.release_year,
            audio_url: command.audio_url,
            cover_image_url: command.cover_image_url,
            created_by,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(song).await
    }

    async fn get_song(&self, id: &SongId) -> Result<Song, SongError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SongError::NotFound(id.to_string()))
    }

    async fn list_songs(&self, query: SongPageQuery) -> Result<SongPage, SongError> {
        if let Some(hit) = self.page_cache.get(&query) {
            tracing::debug!(page = query.page, "Song listing served from cache");
            return Ok(hit);
        }

        let total_items = self.repository.count(query.search.clone()).await?;
        let items = self.repository.list(&query).await?;

        let page = SongPage {
            items,
            page: query.page,
            total_pages: total_items.div_ceil(query.page_size as u64),
            total_items,
        };

        self.page_cache.insert(query, page.clone());

        Ok(page)
    }

    async fn search_songs(&self, text: &str) -> Result<Vec<Song>, SongError> {
        self.repository.search(text, SEARCH_RESULT_LIMIT).await
    }

    async fn update_song(
        &self,
        id: &SongId,
        command: UpdateSongCommand,
        acting: AccountId,
    ) -> Result<Song, SongError> {
        let mut song = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(SongError::NotFound(id.to_string()))?;

        if song.created_by != acting {
            return Err(SongError::Forbidden);
        }

        if let Some(title) = command.title {
            song.title = title;
        }
        if let Some(artist) = command.artist {
            song.artist = artist;
        }
        if let Some(album) = command.album {
            song.album = Some(album);
        }
        if let Some(genre) = command.genre {
            song.genre = Some(genre);
        }
        if let Some(duration) = command.duration_seconds {
            song.duration_seconds = Some(duration);
        }
        if let Some(year) = command.release_year {
            song.release_year = Some(year);
        }
        if let Some(audio_url) = command.audio_url {
            song.audio_url = Some(audio_url);
        }
        if let Some(cover_image_url) = command.cover_image_url {
            song.cover_image_url = Some(cover_image_url);
        }
        song.updated_at = Utc::now();

        self.repository.update(song).await
    }

    async fn delete_song(&self, id: &SongId, acting: AccountId) -> Result<(), SongError> {
        let song = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(SongError::NotFound(id.to_string()))?;

        if song.created_by != acting {
            return Err(SongError::Forbidden);
        }

        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::song::models::ArtistName;
    use crate::domain::song::models::SongTitle;

    mock! {
        pub TestSongRepository {}

        #[async_trait]
        impl SongRepository for TestSongRepository {
            async fn create(&self, song: Song) -> Result<Song, SongError>;
            async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, SongError>;
            async fn list(&self, query: &SongPageQuery) -> Result<Vec<Song>, SongError>;
            async fn count(&self, search: Option<String>) -> Result<u64, SongError>;
            async fn search(&self, text: &str, limit: u32) -> Result<Vec<Song>, SongError>;
            async fn update(&self, song: Song) -> Result<Song, SongError>;
            async fn delete(&self, id: &SongId) -> Result<(), SongError>;
        }
    }

    fn test_song(created_by: AccountId) -> Song {
        let now = Utc::now();
        Song {
            id: SongId::new(),
            title: SongTitle::new("Bohemian Rhapsody".to_string()).unwrap(),
            artist: ArtistName::new("Queen".to_string()).unwrap(),
            album: Some("A Night at the Opera".to_string()),
            genre: None,
            duration_seconds: None,
            release_year: None,
            audio_url: None,
            cover_image_url: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_song_stamps_creator() {
        let creator = AccountId::new();

        let mut repository = MockTestSongRepository::new();
        repository
            .expect_create()
            .withf(move |song| song.created_by == creator && song.title.as_str() == "Yesterday")
            .times(1)
            .returning(Ok);

        let service = SongService::new(Arc::new(repository));

        let command = CreateSongCommand {
            title: SongTitle::new("Yesterday".to_string()).unwrap(),
            artist: ArtistName::new("The Beatles".to_string()).unwrap(),
            album: None,
            genre: None,
            duration_seconds: None,
            release_year: None,
            audio_url: None,
            cover_image_url: None,
        };

        let song = service.create_song(command, creator).await.unwrap();
        assert_eq!(song.created_by, creator);
    }

    #[tokio::test]
    async fn test_list_songs_pagination_math() {
        let mut repository = MockTestSongRepository::new();
        repository.expect_count().times(1).returning(|_| Ok(25));
        repository.expect_list().times(1).returning(|_| Ok(vec![]));

        let service = SongService::new(Arc::new(repository));

        let page = service
            .list_songs(SongPageQuery {
                page: 3,
                page_size: 10,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_items, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
    }

    #[tokio::test]
    async fn test_list_songs_memoizes_identical_queries() {
        let mut repository = MockTestSongRepository::new();
        // One store round trip despite two identical calls.
        repository.expect_count().times(1).returning(|_| Ok(1));
        let creator = AccountId::new();
        repository
            .expect_list()
            .times(1)
            .returning(move |_| Ok(vec![test_song(creator)]));

        let service = SongService::new(Arc::new(repository));
        let query = SongPageQuery::default();

        let first = service.list_songs(query.clone()).await.unwrap();
        let second = service.list_songs(query).await.unwrap();

        assert_eq!(first.total_items, second.total_items);
        assert_eq!(second.items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_songs_forwards_search_to_count() {
        let mut repository = MockTestSongRepository::new();
        repository
            .expect_count()
            .with(eq(Some("queen".to_string())))
            .times(1)
            .returning(|_| Ok(0));
        repository.expect_list().times(1).returning(|_| Ok(vec![]));

        let service = SongService::new(Arc::new(repository));

        service
            .list_songs(SongPageQuery {
                search: Some("queen".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_songs_distinct_queries_are_distinct_entries() {
        let mut repository = MockTestSongRepository::new();
        repository.expect_count().times(2).returning(|_| Ok(0));
        repository.expect_list().times(2).returning(|_| Ok(vec![]));

        let service = SongService::new(Arc::new(repository));

        service
            .list_songs(SongPageQuery::default())
            .await
            .unwrap();
        service
            .list_songs(SongPageQuery {
                page: 2,
                ..Default::default()
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_song_by_non_creator_is_forbidden() {
        // Policy decision: song mutation is owner-gated, same as
        // playlists.
        let creator = AccountId::new();
        let song = test_song(creator);
        let song_id = song.id;

        let mut repository = MockTestSongRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(song.clone())));
        repository.expect_update().times(0);

        let service = SongService::new(Arc::new(repository));

        let result = service
            .update_song(&song_id, UpdateSongCommand::default(), AccountId::new())
            .await;
        assert!(matches!(result, Err(SongError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_song_partial() {
        let creator = AccountId::new();
        let song = test_song(creator);
        let song_id = song.id;

        let mut repository = MockTestSongRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(song.clone())));
        repository
            .expect_update()
            .withf(|song| song.title.as_str() == "Renamed" && song.artist.as_str() == "Queen")
            .times(1)
            .returning(Ok);

        let service = SongService::new(Arc::new(repository));

        let command = UpdateSongCommand {
            title: Some(SongTitle::new("Renamed".to_string()).unwrap()),
            ..Default::default()
        };

        let updated = service.update_song(&song_id, command, creator).await.unwrap();
        assert_eq!(updated.title.as_str(), "Renamed");
    }

    #[tokio::test]
    async fn test_delete_song_by_non_creator_is_forbidden() {
        let creator = AccountId::new();
        let song = test_song(creator);
        let song_id = song.id;

        let mut repository = MockTestSongRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(song.clone())));
        repository.expect_delete().times(0);

        let service = SongService::new(Arc::new(repository));

        let result = service.delete_song(&song_id, AccountId::new()).await;
        assert!(matches!(result, Err(SongError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_missing_song() {
        let mut repository = MockTestSongRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = SongService::new(Arc::new(repository));

        let result = service.delete_song(&SongId::new(), AccountId::new()).await;
        assert!(matches!(result, Err(SongError::NotFound(_))));
    }
}
