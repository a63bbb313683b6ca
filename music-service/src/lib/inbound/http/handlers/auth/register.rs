use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::AuthResponseData;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldIssue;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref authenticated| ApiSuccess::new(StatusCode::CREATED, authenticated.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

impl RegisterRequest {
    /// Validate all fields, collecting every issue so the client can fix
    /// the whole form at once.
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        let mut issues = Vec::new();

        let username = Username::new(self.username)
            .map_err(|e| issues.push(FieldIssue::new("username", e)))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| issues.push(FieldIssue::new("email", e)))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| issues.push(FieldIssue::new("password", e)))
            .ok();

        match (username, email, password) {
            (Some(username), Some(email), Some(password)) => {
                Ok(RegisterCommand::new(username, email, password))
            }
            _ => Err(ApiError::Validation(issues)),
        }
    }
}
