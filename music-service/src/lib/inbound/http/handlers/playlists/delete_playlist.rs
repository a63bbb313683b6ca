use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_playlist_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageResponse;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_playlist(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Path(playlist_id): Path<String>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    let id = parse_playlist_id(&playlist_id)?;

    state
        .playlist_service
        .delete_playlist(&id, current.account_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageResponse::new("Playlist removed")))
}
