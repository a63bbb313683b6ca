use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::PlaylistData;
use crate::domain::playlist::models::CreatePlaylistCommand;
use crate::domain::playlist::models::PlaylistName;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldIssue;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn create_playlist(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Json(body): Json<CreatePlaylistRequest>,
) -> Result<ApiSuccess<PlaylistData>, ApiError> {
    state
        .playlist_service
        .create_playlist(body.try_into_command()?, current.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref playlist| ApiSuccess::new(StatusCode::OK, playlist.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePlaylistRequest {
    name: String,
    description: Option<String>,
}

impl CreatePlaylistRequest {
    fn try_into_command(self) -> Result<CreatePlaylistCommand, ApiError> {
        let name = PlaylistName::new(self.name)
            .map_err(|e| ApiError::Validation(vec![FieldIssue::new("name", e)]))?;
        Ok(CreatePlaylistCommand {
            name,
            description: self.description,
        })
    }
}
