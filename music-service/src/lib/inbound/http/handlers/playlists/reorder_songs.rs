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

pub async fn reorder_songs(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Path(playlist_id): Path<String>,
    Json(body): Json<ReorderSongsRequest>,
) -> Result<ApiSuccess<PlaylistData>, ApiError> {
    let id = parse_playlist_id(&playlist_id)?;
    let ordered = body
        .song_ids
        .iter()
        .map(|raw| parse_member_song_id(raw))
        .collect::<Result<Vec<_>, _>>()?;

    state
        .playlist_service
        .reorder_songs(&id, ordered, current.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref playlist| ApiSuccess::new(StatusCode::OK, playlist.into()))
}

/// The full membership in its proposed order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderSongsRequest {
    song_ids: Vec<String>,
}
