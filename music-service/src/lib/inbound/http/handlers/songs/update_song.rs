use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::parse_song_id;
use super::SongData;
use crate::domain::song::models::ArtistName;
use crate::domain::song::models::DurationSeconds;
use crate::domain::song::models::ReleaseYear;
use crate::domain::song::models::SongTitle;
use crate::domain::song::models::UpdateSongCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldIssue;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn update_song(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Path(song_id): Path<String>,
    Json(body): Json<UpdateSongRequest>,
) -> Result<ApiSuccess<SongData>, ApiError> {
    let id = parse_song_id(&song_id)?;

    state
        .song_service
        .update_song(&id, body.try_into_command()?, current.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref song| ApiSuccess::new(StatusCode::OK, song.into()))
}

/// Partial update body; absent fields keep their stored values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSongRequest {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    genre: Option<String>,
    duration: Option<i32>,
    release_year: Option<i32>,
    audio_url: Option<String>,
    cover_image_url: Option<String>,
}

impl UpdateSongRequest {
    fn try_into_command(self) -> Result<UpdateSongCommand, ApiError> {
        let mut issues = Vec::new();

        let title = match self.title {
            Some(title) => SongTitle::new(title)
                .map_err(|e| issues.push(FieldIssue::new("title", e)))
                .ok()
                .map(Some),
            None => Some(None),
        };
        let artist = match self.artist {
            Some(artist) => ArtistName::new(artist)
                .map_err(|e| issues.push(FieldIssue::new("artist", e)))
                .ok()
                .map(Some),
            None => Some(None),
        };
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
                Ok(UpdateSongCommand {
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
