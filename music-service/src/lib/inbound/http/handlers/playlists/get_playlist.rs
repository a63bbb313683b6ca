use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_playlist_id;
use super::PlaylistData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn get_playlist(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Path(playlist_id): Path<String>,
) -> Result<ApiSuccess<PlaylistData>, ApiError> {
    let id = parse_playlist_id(&playlist_id)?;

    state
        .playlist_service
        .get_playlist(&id, current.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref playlist| ApiSuccess::new(StatusCode::OK, playlist.into()))
}
