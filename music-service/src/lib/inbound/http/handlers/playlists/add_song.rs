use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::parse_member_song_id;
use super::parse_playlist_id;
use super::PlaylistData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn add_song(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Path(playlist_id): Path<String>,
    Json(body): Json<AddSongRequest>,
) -> Result<ApiSuccess<PlaylistData>, ApiError> {
    let id = parse_playlist_id(&playlist_id)?;
    let song_id = parse_member_song_id(&body.song_id)?;

    state
        .playlist_service
        .add_song(&id, song_id, current.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref playlist| ApiSuccess::new(StatusCode::OK, playlist.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSongRequest {
    song_id: String,
}
