use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::playlist::errors::PlaylistError;
use crate::domain::playlist::models::Playlist;
use crate::domain::playlist::models::PlaylistId;
use crate::domain::playlist::models::PlaylistName;
use crate::domain::playlist::ports::PlaylistRepository;
use crate::domain::song::models::SongId;

pub struct PostgresPlaylistRepository {
    pool: PgPool,
}

impl PostgresPlaylistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Membership is stored as a UUID array; element order in the column is
/// the playlist order.
#[derive(Debug, FromRow)]
struct PlaylistRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    owner: Uuid,
    song_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PlaylistRow {
    fn into_playlist(self) -> Result<Playlist, PlaylistError> {
        Ok(Playlist {
            id: PlaylistId(self.id),
            name: PlaylistName::new(self.name)?,
            description: self.description,
            owner: AccountId(self.owner),
            songs: self.song_ids.into_iter().map(SongId).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn song_uuids(playlist: &Playlist) -> Vec<Uuid> {
    playlist.songs.iter().map(|s| s.0).collect()
}

#[async_trait]
impl PlaylistRepository for PostgresPlaylistRepository {
    async fn create(&self, playlist: Playlist) -> Result<Playlist, PlaylistError> {
        sqlx::query(
            r#"
            INSERT INTO playlists (id, name, description, owner, song_ids, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(playlist.id.0)
        .bind(playlist.name.as_str())
        .bind(&playlist.description)
        .bind(playlist.owner.0)
        .bind(song_uuids(&playlist))
        .bind(playlist.created_at)
        .bind(playlist.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PlaylistError::DatabaseError(e.to_string()))?;

        Ok(playlist)
    }

    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>, PlaylistError> {
        let row: Option<PlaylistRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, owner, song_ids, created_at, updated_at
            FROM playlists
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PlaylistError::DatabaseError(e.to_string()))?;

        row.map(PlaylistRow::into_playlist).transpose()
    }

    async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<Playlist>, PlaylistError> {
        let rows: Vec<PlaylistRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, owner, song_ids, created_at, updated_at
            FROM playlists
            WHERE owner = $1
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PlaylistError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(PlaylistRow::into_playlist).collect()
    }

    async fn update(&self, playlist: Playlist) -> Result<Playlist, PlaylistError> {
        let result = sqlx::query(
            r#"
            UPDATE playlists
            SET name = $2, description = $3, song_ids = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(playlist.id.0)
        .bind(playlist.name.as_str())
        .bind(&playlist.description)
        .bind(song_uuids(&playlist))
        .bind(playlist.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PlaylistError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PlaylistError::NotFound(playlist.id.to_string()));
        }

        Ok(playlist)
    }

    async fn delete(&self, id: &PlaylistId) -> Result<(), PlaylistError> {
        let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| PlaylistError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PlaylistError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
