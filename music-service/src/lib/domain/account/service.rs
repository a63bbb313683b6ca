use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthenticatedAccount;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service for registration, login, and token refresh.
///
/// Generic over the repository for testability. Password hashing and
/// token signing come from the auth crate.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: auth::PasswordHasher,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    pub fn new(repository: Arc<AR>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            token_issuer,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedAccount, AccountError> {
        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| AccountError::Internal(format!("Password hashing failed: {}", e)))?;

        let account = Account {
            id: AccountId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let account = self.repository.create(account).await?;

        let tokens = self
            .token_issuer
            .issue_pair(account.id)
            .map_err(|e| AccountError::Internal(format!("Token issuance failed: {}", e)))?;

        Ok(AuthenticatedAccount { account, tokens })
    }

    async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount, AccountError> {
        let account = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        // A hasher failure is an infrastructure problem and must not be
        // reported as bad credentials.
        let matches = self
            .password_hasher
            .verify(password, &account.password_hash)
            .map_err(|e| AccountError::Internal(format!("Password verification failed: {}", e)))?;

        if !matches {
            return Err(AccountError::InvalidCredentials);
        }

        let tokens = self
            .token_issuer
            .issue_pair(account.id)
            .map_err(|e| AccountError::Internal(format!("Token issuance failed: {}", e)))?;

        Ok(AuthenticatedAccount { account, tokens })
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AccountError> {
        let claims = self
            .token_issuer
            .verify_refresh_token(refresh_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                AccountError::InvalidRefreshToken
            })?;

        let account_id =
            AccountId::from_string(&claims.sub).map_err(|_| AccountError::InvalidRefreshToken)?;

        let account = self
            .repository
            .find_by_id(&account_id)
            .await?
            .ok_or(AccountError::NotFound(account_id.to_string()))?;

        self.token_issuer
            .issue_access_token(account.id)
            .map_err(|e| AccountError::Internal(format!("Token issuance failed: {}", e)))
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtError;
    use chrono::Duration;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::Password;
    use crate::domain::account::models::Username;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError>;
        }
    }

    fn test_issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(
            b"access_secret_at_least_32_bytes!!",
            b"refresh_secret_at_least_32_bytes!",
            Duration::minutes(15),
            Duration::days(7),
        ))
    }

    fn test_account(password: &str) -> Account {
        Account {
            id: AccountId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn register_command() -> RegisterCommand {
        RegisterCommand {
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
            password: Password::new("Str0ng!Pass".to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_success_issues_token_pair() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_create()
            .withf(|account| {
                account.username.as_str() == "alice"
                    && account.email.as_str() == "alice@x.com"
                    && account.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(Ok);

        let issuer = test_issuer();
        let service = AccountService::new(Arc::new(repository), Arc::clone(&issuer));

        let result = service.register(register_command()).await.unwrap();

        assert_eq!(result.account.username.as_str(), "alice");
        // Both tokens verify against their own secret.
        let access = issuer
            .verify_access_token(&result.tokens.access_token)
            .unwrap();
        assert_eq!(access.sub, result.account.id.to_string());
        issuer
            .verify_refresh_token(&result.tokens.refresh_token)
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_create().times(1).returning(|account| {
            Err(AccountError::UsernameTaken(
                account.username.as_str().to_string(),
            ))
        });

        let service = AccountService::new(Arc::new(repository), test_issuer());

        let result = service.register(register_command()).await;
        assert!(matches!(result, Err(AccountError::UsernameTaken(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let account = test_account("Str0ng!Pass");
        let returned = account.clone();

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_identifier()
            .with(eq("alice@x.com"))
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = AccountService::new(Arc::new(repository), test_issuer());

        let result = service.login("alice@x.com", "Str0ng!Pass").await.unwrap();
        assert_eq!(result.account.id, account.id);
    }

    #[tokio::test]
    async fn test_login_unknown_identifier_is_invalid_credentials() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository), test_issuer());

        let result = service.login("nobody", "Str0ng!Pass").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_invalid_credentials() {
        let account = test_account("Str0ng!Pass");

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(Arc::new(repository), test_issuer());

        let result = service.login("alice", "Wr0ng!Pass").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_refresh_returns_new_access_token() {
        let account = test_account("Str0ng!Pass");
        let account_id = account.id;

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let issuer = test_issuer();
        let refresh_token = issuer.issue_refresh_token(account_id).unwrap();

        let service = AccountService::new(Arc::new(repository), Arc::clone(&issuer));

        let access_token = service.refresh_access_token(&refresh_token).await.unwrap();
        let claims = issuer.verify_access_token(&access_token).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let repository = MockTestAccountRepository::new();
        let issuer = test_issuer();

        // Signed with the access secret; must fail against the refresh
        // secret before any store lookup happens.
        let access_token = issuer.issue_access_token(AccountId::new()).unwrap();

        let service = AccountService::new(Arc::new(repository), issuer);

        let result = service.refresh_access_token(&access_token).await;
        assert!(matches!(result, Err(AccountError::InvalidRefreshToken)));
    }

    #[tokio::test]
    async fn test_refresh_for_deleted_account() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let issuer = test_issuer();
        let refresh_token = issuer.issue_refresh_token(AccountId::new()).unwrap();

        let service = AccountService::new(Arc::new(repository), issuer);

        let result = service.refresh_access_token(&refresh_token).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage() {
        let repository = MockTestAccountRepository::new();
        let service = AccountService::new(Arc::new(repository), test_issuer());

        let result = service.refresh_access_token("not.a.token").await;
        assert!(matches!(result, Err(AccountError::InvalidRefreshToken)));
    }

    #[test]
    fn test_expired_token_error_class() {
        // An expired access token reports expiry, not a bad signature.
        let issuer = TokenIssuer::new(
            b"access_secret_at_least_32_bytes!!",
            b"refresh_secret_at_least_32_bytes!",
            Duration::minutes(-30),
            Duration::days(7),
        );
        let token = issuer.issue_access_token(AccountId::new()).unwrap();
        assert_eq!(
            issuer.verify_access_token(&token),
            Err(JwtError::TokenExpired)
        );
    }
}
