use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::PlaylistData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn list_playlists(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
) -> Result<ApiSuccess<Vec<PlaylistData>>, ApiError> {
    state
        .playlist_service
        .list_playlists(current.account_id)
        .await
        .map_err(ApiError::from)
        .map(|playlists| {
            ApiSuccess::new(
                StatusCode::OK,
                playlists.iter().map(PlaylistData::from).collect(),
            )
        })
}
