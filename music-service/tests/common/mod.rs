use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenIssuer;
use chrono::Duration;
use music_service::domain::account::errors::AccountError;
use music_service::domain::account::models::Account;
use music_service::domain::account::models::AccountId;
use music_service::domain::account::ports::AccountRepository;
use music_service::domain::account::service::AccountService;
use music_service::domain::playlist::errors::PlaylistError;
use music_service::domain::playlist::models::Playlist;
use music_service::domain::playlist::models::PlaylistId;
use music_service::domain::playlist::ports::PlaylistRepository;
use music_service::domain::playlist::service::PlaylistService;
use music_service::domain::song::errors::SongError;
use music_service::domain::song::models::Song;
use music_service::domain::song::models::SongId;
use music_service::domain::song::models::SongPageQuery;
use music_service::domain::song::models::SongSortField;
use music_service::domain::song::models::SortDirection;
use music_service::domain::song::ports::SongRepository;
use music_service::domain::song::service::SongService;
use music_service::inbound::http::router::create_router;
use serde_json::json;
use serde_json::Value;

/// Test application backed by in-memory repositories, spawned on a
/// random port.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_issuer = Arc::new(TokenIssuer::new(
            b"test-access-secret-at-least-32-bytes-long",
            b"test-refresh-secret-at-least-32-bytes-lo",
            Duration::minutes(15),
            Duration::days(7),
        ));

        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryAccountRepository::default()),
            Arc::clone(&token_issuer),
        ));
        let song_service = Arc::new(SongService::new(Arc::new(InMemorySongRepository::default())));
        let playlist_service = Arc::new(PlaylistService::new(Arc::new(
            InMemoryPlaylistRepository::default(),
        )));

        let router = create_router(account_service, song_service, playlist_service, token_issuer);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the response body (tokens plus
    /// profile).
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Register an account and return just its access token.
    pub async fn register_and_token(&self, username: &str, email: &str) -> String {
        let body = self.register(username, email, "Str0ng!Pass").await;
        body["accessToken"].as_str().expect("no access token").to_string()
    }

    /// Add a catalog song and return its id.
    pub async fn create_song(&self, token: &str, title: &str, artist: &str) -> String {
        let response = self
            .post_authenticated("/api/songs", token)
            .json(&json!({ "title": title, "artist": artist }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_str().expect("no song id").to_string()
    }

    /// Create a playlist and return its id.
    pub async fn create_playlist(&self, token: &str, name: &str) -> String {
        let response = self
            .post_authenticated("/api/playlists", token)
            .json(&json!({ "name": name }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_str().expect("no playlist id").to_string()
    }
}

#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts
            .iter()
            .any(|a| a.username.as_str() == account.username.as_str())
        {
            return Err(AccountError::UsernameTaken(
                account.username.as_str().to_string(),
            ));
        }
        if accounts
            .iter()
            .any(|a| a.email.as_str() == account.email.as_str())
        {
            return Err(AccountError::EmailTaken(account.email.as_str().to_string()));
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == *id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .find(|a| a.username.as_str() == identifier || a.email.as_str() == identifier)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemorySongRepository {
    songs: Mutex<Vec<Song>>,
}

fn matches_search(song: &Song, search: &str) -> bool {
    let needle = search.to_lowercase();
    song.title.as_str().to_lowercase().contains(&needle)
        || song.artist.as_str().to_lowercase().contains(&needle)
}

fn compare_songs(a: &Song, b: &Song, field: SongSortField, direction: SortDirection) -> Ordering {
    let ordering = match field {
        SongSortField::Title => a.title.as_str().cmp(b.title.as_str()),
        SongSortField::Artist => a.artist.as_str().cmp(b.artist.as_str()),
        SongSortField::Album => a.album.cmp(&b.album),
        SongSortField::ReleaseYear => a
            .release_year
            .map(|y| y.value())
            .cmp(&b.release_year.map(|y| y.value())),
        SongSortField::CreatedAt => a.created_at.cmp(&b.created_at),
    };
    let ordering = match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    };
    // Deterministic tie-break, matching the SQL repository.
    ordering.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl SongRepository for InMemorySongRepository {
    async fn create(&self, song: Song) -> Result<Song, SongError> {
        self.songs.lock().unwrap().push(song.clone());
        Ok(song)
    }

    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, SongError> {
        Ok(self.songs.lock().unwrap().iter().find(|s| s.id == *id).cloned())
    }

    async fn list(&self, query: &SongPageQuery) -> Result<Vec<Song>, SongError> {
        let mut songs: Vec<Song> = self
            .songs
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                query
                    .search
                    .as_deref()
                    .map_or(true, |search| matches_search(s, search))
            })
            .cloned()
            .collect();
        songs.sort_by(|a, b| compare_songs(a, b, query.sort_field, query.sort_direction));
        Ok(songs
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .collect())
    }

    async fn count(&self, search: Option<String>) -> Result<u64, SongError> {
        let songs = self.songs.lock().unwrap();
        Ok(songs
            .iter()
            .filter(|s| search.as_deref().map_or(true, |search| matches_search(s, search)))
            .count() as u64)
    }

    async fn search(&self, text: &str, limit: u32) -> Result<Vec<Song>, SongError> {
        let mut songs: Vec<Song> = self
            .songs
            .lock()
            .unwrap()
            .iter()
            .filter(|s| matches_search(s, text))
            .cloned()
            .collect();
        songs.sort_by(|a, b| {
            compare_songs(a, b, SongSortField::Title, SortDirection::Ascending)
        });
        songs.truncate(limit as usize);
        Ok(songs)
    }

    async fn update(&self, song: Song) -> Result<Song, SongError> {
        let mut songs = self.songs.lock().unwrap();
        let slot = songs
            .iter_mut()
            .find(|s| s.id == song.id)
            .ok_or_else(|| SongError::NotFound(song.id.to_string()))?;
        *slot = song.clone();
        Ok(song)
    }

    async fn delete(&self, id: &SongId) -> Result<(), SongError> {
        let mut songs = self.songs.lock().unwrap();
        let before = songs.len();
        songs.retain(|s| s.id != *id);
        if songs.len() == before {
            return Err(SongError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPlaylistRepository {
    playlists: Mutex<Vec<Playlist>>,
}

#[async_trait]
impl PlaylistRepository for InMemoryPlaylistRepository {
    async fn create(&self, playlist: Playlist) -> Result<Playlist, PlaylistError> {
        self.playlists.lock().unwrap().push(playlist.clone());
        Ok(playlist)
    }

    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>, PlaylistError> {
        Ok(self
            .playlists
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *id)
            .cloned())
    }

    async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<Playlist>, PlaylistError> {
        let mut playlists: Vec<Playlist> = self
            .playlists
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.owner == *owner)
            .cloned()
            .collect();
        playlists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(playlists)
    }

    async fn update(&self, playlist: Playlist) -> Result<Playlist, PlaylistError> {
        let mut playlists = self.playlists.lock().unwrap();
        let slot = playlists
            .iter_mut()
            .find(|p| p.id == playlist.id)
            .ok_or_else(|| PlaylistError::NotFound(playlist.id.to_string()))?;
        *slot = playlist.clone();
        Ok(playlist)
    }

    async fn delete(&self, id: &PlaylistId) -> Result<(), PlaylistError> {
        let mut playlists = self.playlists.lock().unwrap();
        let before = playlists.len();
        playlists.retain(|p| p.id != *id);
        if playlists.len() == before {
            return Err(PlaylistError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
