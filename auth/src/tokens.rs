use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issues and verifies the platform's access and refresh tokens.
///
/// The two token kinds are signed with distinct secrets: a leaked access
/// secret cannot be used to mint refresh tokens, and vice versa. Tokens
/// are never persisted; verification is a pure function of the token,
/// the secret, and the clock.
pub struct TokenIssuer {
    access: JwtHandler,
    refresh: JwtHandler,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

/// Freshly issued access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenIssuer {
    /// Create a token issuer.
    ///
    /// # Arguments
    /// * `access_secret` - Signing secret for access tokens
    /// * `refresh_secret` - Signing secret for refresh tokens (distinct)
    /// * `access_lifetime` - Access token TTL (short, minutes)
    /// * `refresh_lifetime` - Refresh token TTL (long, days)
    pub fn new(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Self {
        Self {
            access: JwtHandler::new(access_secret),
            refresh: JwtHandler::new(refresh_secret),
            access_lifetime,
            refresh_lifetime,
        }
    }

    /// Issue a short-lived access token for the given account.
    pub fn issue_access_token(&self, account_id: impl ToString) -> Result<String, JwtError> {
        let claims = Claims::for_subject(account_id, self.access_lifetime);
        self.access.encode(&claims)
    }

    /// Issue a long-lived refresh token for the given account.
    pub fn issue_refresh_token(&self, account_id: impl ToString) -> Result<String, JwtError> {
        let claims = Claims::for_subject(account_id, self.refresh_lifetime);
        self.refresh.encode(&claims)
    }

    /// Issue an access/refresh pair, as returned by register and login.
    pub fn issue_pair(&self, account_id: impl ToString + Clone) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(account_id.clone())?,
            refresh_token: self.issue_refresh_token(account_id)?,
        })
    }

    /// Verify a token against the access secret.
    ///
    /// # Errors
    /// * `TokenExpired` - Access token lifetime has passed
    /// * `InvalidToken` - Wrong secret, malformed, or a refresh token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.access.decode(token)
    }

    /// Verify a token against the refresh secret.
    ///
    /// # Errors
    /// * `TokenExpired` - Refresh token lifetime has passed
    /// * `InvalidToken` - Wrong secret, malformed, or an access token
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.refresh.decode(token)
    }
}
