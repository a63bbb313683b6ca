use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::parse_playlist_id;
use super::PlaylistData;
use crate::domain::playlist::models::PlaylistName;
use crate::domain::playlist::models::UpdatePlaylistCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldIssue;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn update_playlist(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Path(playlist_id): Path<String>,
    Json(body): Json<UpdatePlaylistRequest>,
) -> Result<ApiSuccess<PlaylistData>, ApiError> {
    let id = parse_playlist_id(&playlist_id)?;

    state
        .playlist_service
        .update_playlist(&id, body.try_into_command()?, current.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref playlist| ApiSuccess::new(StatusCode::OK, playlist.into()))
}

/// Partial update body; absent fields keep their stored values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdatePlaylistRequest {
    name: Option<String>,
    description: Option<String>,
}

impl UpdatePlaylistRequest {
    fn try_into_command(self) -> Result<UpdatePlaylistCommand, ApiError> {
        let name = match self.name {
            Some(name) => Some(
                PlaylistName::new(name)
                    .map_err(|e| ApiError::Validation(vec![FieldIssue::new("name", e)]))?,
            ),
            None => None,
        };
        Ok(UpdatePlaylistCommand {
            name,
            description: self.description,
        })
    }
}
