use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::song::errors::SongError;
use crate::domain::song::models::ArtistName;
use crate::domain::song::models::DurationSeconds;
use crate::domain::song::models::ReleaseYear;
use crate::domain::song::models::Song;
use crate::domain::song::models::SongId;
use crate::domain::song::models::SongPageQuery;
use crate::domain::song::models::SongTitle;
use crate::domain::song::models::SortDirection;
use crate::domain::song::ports::SongRepository;

const SONG_COLUMNS: &str = "id, title, artist, album, genre, duration_seconds, release_year, \
                            audio_url, cover_image_url, created_by, created_at, updated_at";

pub struct PostgresSongRepository {
    pool: PgPool,
}

impl PostgresSongRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SongRow {
    id: Uuid,
    title: String,
    artist: String,
    album: Option<String>,
    genre: Option<String>,
    duration_seconds: Option<i32>,
    release_year: Option<i32>,
    audio_url: Option<String>,
    cover_image_url: Option<String>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SongRow {
    fn into_song(self) -> Result<Song, SongError> {
        Ok(Song {
            id: SongId(self.id),
            title: SongTitle::new(self.title)?,
            artist: ArtistName::new(self.artist)?,
            album: self.album,
            genre: self.genre,
            duration_seconds: self.duration_seconds.map(DurationSeconds::new).transpose()?,
            release_year: self.release_year.map(ReleaseYear::new).transpose()?,
            audio_url: self.audio_url,
            cover_image_url: self.cover_image_url,
            created_by: AccountId(self.created_by),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// `%text%` pattern for a case-insensitive substring match.
///
/// `%`, `_`, and `\` in the search text are escaped so they match
/// literally instead of acting as LIKE wildcards.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl SongRepository for PostgresSongRepository {
    async fn create(&self, song: Song) -> Result<Song, SongError> {
        sqlx::query(
            r#"
            INSERT INTO songs (id, title, artist, album, genre, duration_seconds,
                               release_year, audio_url, cover_image_url,
                               created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(song.id.0)
        .bind(song.title.as_str())
        .bind(song.artist.as_str())
        .bind(&song.album)
        .bind(&song.genre)
        .bind(song.duration_seconds.map(|d| d.value()))
        .bind(song.release_year.map(|y| y.value()))
        .bind(&song.audio_url)
        .bind(&song.cover_image_url)
        .bind(song.created_by.0)
        .bind(song.created_at)
        .bind(song.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SongError::DatabaseError(e.to_string()))?;

        Ok(song)
    }

    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, SongError> {
        let row: Option<SongRow> = sqlx::query_as(&format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SongError::DatabaseError(e.to_string()))?;

        row.map(SongRow::into_song).transpose()
    }

    async fn list(&self, query: &SongPageQuery) -> Result<Vec<Song>, SongError> {
        // The sort column comes from a closed enum, never from client
        // input, so interpolating it is safe.
        let column = query.sort_field.column_name();
        let direction = match query.sort_direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };

        let rows: Vec<SongRow> = match &query.search {
            Some(search) => {
                let sql = format!(
                    "SELECT {SONG_COLUMNS} FROM songs \
                     WHERE title ILIKE $1 OR artist ILIKE $1 \
                     ORDER BY {column} {direction}, id ASC \
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as(&sql)
                    .bind(like_pattern(search))
                    .bind(query.page_size as i64)
                    .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {SONG_COLUMNS} FROM songs \
                     ORDER BY {column} {direction}, id ASC \
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as(&sql)
                    .bind(query.page_size as i64)
                    .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| SongError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(SongRow::into_song).collect()
    }

    async fn count(&self, search: Option<String>) -> Result<u64, SongError> {
        let count: i64 = match search {
            Some(search) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM songs WHERE title ILIKE $1 OR artist ILIKE $1",
                )
                .bind(like_pattern(&search))
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM songs")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| SongError::DatabaseError(e.to_string()))?;

        Ok(count as u64)
    }

    async fn search(&self, text: &str, limit: u32) -> Result<Vec<Song>, SongError> {
        let rows: Vec<SongRow> = sqlx::query_as(&format!(
            "SELECT {SONG_COLUMNS} FROM songs \
             WHERE title ILIKE $1 OR artist ILIKE $1 \
             ORDER BY title ASC, id ASC \
             LIMIT $2"
        ))
        .bind(like_pattern(text))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SongError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(SongRow::into_song).collect()
    }

    async fn update(&self, song: Song) -> Result<Song, SongError> {
        let result = sqlx::query(
            r#"
            UPDATE songs
            SET title = $2, artist = $3, album = $4, genre = $5,
                duration_seconds = $6, release_year = $7, audio_url = $8,
                cover_image_url = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(song.id.0)
        .bind(song.title.as_str())
        .bind(song.artist.as_str())
        .bind(&song.album)
        .bind(&song.genre)
        .bind(song.duration_seconds.map(|d| d.value()))
        .bind(song.release_year.map(|y| y.value()))
        .bind(&song.audio_url)
        .bind(&song.cover_image_url)
        .bind(song.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SongError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(SongError::NotFound(song.id.to_string()));
        }

        Ok(song)
    }

    async fn delete(&self, id: &SongId) -> Result<(), SongError> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| SongError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(SongError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_plain_text() {
        assert_eq!(like_pattern("queen"), "%queen%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), r"%100\%%");
        assert_eq!(like_pattern("a_c"), r"%a\_c%");
        assert_eq!(like_pattern(r"back\slash"), r"%back\\slash%");
    }
}
