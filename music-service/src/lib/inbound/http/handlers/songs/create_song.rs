use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::SongData;
use crate::domain::song::models::ArtistName;
use crate::domain::song::models::CreateSongCommand;
use crate::domain::song::models::DurationSeconds;
use crate::domain::song::models::ReleaseYear;
use crate::domain::song::models::SongTitle;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldIssue;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn create_song(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Json(body): Json<CreateSongRequest>,
) -> Result<ApiSuccess<SongData>, ApiError> {
    state
        .song_service
        .create_song(body.try_into_command()?, current.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref song| ApiSuccess::new(StatusCode::CREATED, song.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSongRequest {
    title: String,
    artist: String,
    album: Option<String>,
    genre: Option<String>,
    duration: Option<i32>,
    release_year: Option<i32>,
    audio_url: Option<String>,
    cover_image_url: Option<String>,
}

impl CreateSongRequest {
    fn try_into_command(self) -> Result<CreateSongCommand, ApiError> {
        let mut issues = Vec::new();

        let title = SongTitle::new(self.title)
            .map_err(|e| issues.push(FieldIssue::new("title", e)))
            .ok();
        let artist = ArtistName::new(self.artist)
            .map_err(|e| issues.push(FieldIssue::new("artist", e)))
            .ok();
        let duration_seconds = match self.duration {
            Some(seconds) => DurationSeconds::new(seconds)
                .map_err(|e| issues.push(FieldIssue::new("duration", e)))
                .ok()
                .map(Some),
            None => Some(None),
        };
        let release_year = match self.release_year {
            Some(year) => ReleaseYear::new(year)
                .map_err(|e| issues.push(FieldIssue::new("releaseYear", e)))
                .ok()
                .map(Some),
            None => Some(None),
        };

        match (title, artist, duration_seconds, release_year) {
            (Some(title), Some(artist), Some(duration_seconds), Some(release_year)) => {
                Ok(CreateSongCommand {
                    title,
                    artist,
                    album: self.album,
                    genre: self.genre,
                    duration_seconds,
                    release_year,
                    audio_url: self.audio_url,
                    cover_image_url: self.cover_image_url,
                })
            }
            _ => Err(ApiError::Validation(issues)),
        }
    }
}
