use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::account::models::Account;
use crate::domain::account::models::AuthenticatedAccount;

pub mod current_account;
pub mod login;
pub mod refresh_token;
pub mod register;

/// Account profile as exposed to clients. Never carries the password
/// hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.as_str().to_string(),
            email: account.email.as_str().to_string(),
            created_at: account.created_at,
        }
    }
}

/// Shape returned by register and login: the token pair plus a profile
/// summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AccountData,
}

impl From<&AuthenticatedAccount> for AuthResponseData {
    fn from(authenticated: &AuthenticatedAccount) -> Self {
        Self {
            access_token: authenticated.tokens.access_token.clone(),
            refresh_token: authenticated.tokens.refresh_token.clone(),
            user: (&authenticated.account).into(),
        }
    }
}
