use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::account::models::AccountId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated caller through a request.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub account_id: AccountId,
    pub username: String,
}

/// Authorization gate applied to protected routes.
///
/// Extracts the bearer token, verifies it against the access secret, and
/// re-loads the account so a deleted account is rejected immediately
/// rather than until its token expires. Any failure short-circuits with
/// 401; the downstream handler never runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let claims = state.token_issuer.verify_access_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        ApiError::Unauthorized("Not authorized, token failed".to_string()).into_response()
    })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::error!(error = %e, "Token subject is not an account id");
        ApiError::Unauthorized("Not authorized, token failed".to_string()).into_response()
    })?;

    let account = state
        .account_service
        .get_account(&account_id)
        .await
        .map_err(|e| {
            tracing::warn!(account_id = %account_id, error = %e, "Token account not resolvable");
            ApiError::Unauthorized("Not authorized, token failed".to_string()).into_response()
        })?;

    req.extensions_mut().insert(CurrentAccount {
        account_id: account.id,
        username: account.username.to_string(),
    });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Not authorized, no token".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response()
    })
}
