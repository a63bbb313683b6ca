use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::playlist::errors::PlaylistError;
use crate::domain::song::errors::SongError;

pub mod auth;
pub mod playlists;
pub mod songs;

/// Successful response: a status code and a flat JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl ToString) -> Self {
        Self {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

/// HTTP error taxonomy.
///
/// Every error serializes as `{"message": ...}`; validation failures add
/// an `errors` array of field-level issues. Internal details are logged,
/// never returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Validation(Vec<FieldIssue>),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

/// Wire shape for every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldIssue>>,
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    message: "Validation failed".to_string(),
                    errors: Some(issues),
                },
            ),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, ApiErrorBody::plain(message)),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, ApiErrorBody::plain(message))
            }
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, ApiErrorBody::plain(message)),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, ApiErrorBody::plain(message)),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, ApiErrorBody::plain(message)),
            ApiError::InternalServerError(detail) => {
                tracing::error!(detail = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::plain("Internal server error".to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl ApiErrorBody {
    fn plain(message: String) -> Self {
        Self {
            message,
            errors: None,
        }
    }
}

/// Flat acknowledgement body for delete endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::UsernameTaken(_) | AccountError::EmailTaken(_) => {
                ApiError::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials | AccountError::InvalidRefreshToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AccountError::NotFound(_) => ApiError::NotFound("Account not found".to_string()),
            // Value-object failures here mean the stored row is corrupt;
            // request-side validation never reaches the domain.
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidUsername(_)
            | AccountError::InvalidEmail(_)
            | AccountError::DatabaseError(_)
            | AccountError::Internal(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<SongError> for ApiError {
    fn from(err: SongError) -> Self {
        match err {
            SongError::NotFound(_) => ApiError::NotFound("Song not found".to_string()),
            SongError::Forbidden => ApiError::Forbidden(err.to_string()),
            SongError::InvalidSongId(_)
            | SongError::InvalidField(_)
            | SongError::DatabaseError(_)
            | SongError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<PlaylistError> for ApiError {
    fn from(err: PlaylistError) -> Self {
        match err {
            PlaylistError::NotFound(_) => ApiError::NotFound("Playlist not found".to_string()),
            PlaylistError::Forbidden => ApiError::Forbidden(err.to_string()),
            PlaylistError::DuplicateSong(_) => ApiError::Conflict(err.to_string()),
            PlaylistError::SongNotInPlaylist(_) => {
                ApiError::NotFound("Song not in playlist".to_string())
            }
            PlaylistError::InvalidReorder => ApiError::BadRequest(err.to_string()),
            PlaylistError::InvalidPlaylistId(_)
            | PlaylistError::InvalidName(_)
            | PlaylistError::DatabaseError(_)
            | PlaylistError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}
