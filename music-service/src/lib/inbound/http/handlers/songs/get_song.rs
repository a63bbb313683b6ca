use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_song_id;
use super::SongData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_song(
    State(state): State<AppState>,
    Path(song_id): Path<String>,
) -> Result<ApiSuccess<SongData>, ApiError> {
    let id = parse_song_id(&song_id)?;

    state
        .song_service
        .get_song(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref song| ApiSuccess::new(StatusCode::OK, song.into()))
}
