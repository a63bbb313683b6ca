use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthenticatedAccount;
use crate::domain::account::models::RegisterCommand;

/// Port for account/session operations.
///
/// The server holds no session state; the "session" is the token pair
/// returned to the client.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token pair.
    ///
    /// # Errors
    /// * `UsernameTaken` / `EmailTaken` - Unique field collision
    /// * `Internal` - Hashing or signing failed
    /// * `DatabaseError` - Store operation failed
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedAccount, AccountError>;

    /// Authenticate by username-or-email identifier and password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No matching account or wrong password
    ///   (deliberately indistinguishable)
    /// * `Internal` - Hashing or signing failed
    /// * `DatabaseError` - Store operation failed
    async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount, AccountError>;

    /// Mint a new access token from a valid refresh token.
    ///
    /// The refresh token itself is not rotated.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Signature or expiry failure
    /// * `NotFound` - The account behind the token no longer exists
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AccountError>;

    /// Load an account profile by id.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `UsernameTaken` / `EmailTaken` - Unique constraint violated
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account whose username or email equals the identifier.
    ///
    /// A single lookup tried against both unique fields; this is what
    /// lets login accept either.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError>;
}
