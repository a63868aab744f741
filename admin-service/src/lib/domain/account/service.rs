use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountStatus;
use crate::account::models::AuthenticatedSession;
use crate::account::models::CreateAccountCommand;
use crate::account::models::NewAccount;
use crate::account::ports::AccountServicePort;
use crate::account::ports::AccountStore;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Domain service implementation for account operations.
///
/// Orchestrates the account store, password hashing, and token issuance.
/// Concrete implementation of AccountServicePort with dependency
/// injection.
pub struct AccountService<S>
where
    S: AccountStore,
{
    store: Arc<S>,
    password_hasher: PasswordHasher,
    token_service: Arc<TokenService>,
}

impl<S> AccountService<S>
where
    S: AccountStore,
{
    /// Create a new account service with injected dependencies.
    pub fn new(store: Arc<S>, token_service: Arc<TokenService>) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            token_service,
        }
    }

    fn check_password_policy(password: &str) -> Result<(), AccountError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<S> AccountServicePort for AccountService<S>
where
    S: AccountStore,
{
    async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AccountError> {
        // Unknown identifier and wrong password collapse into the same
        // error so responses cannot leak account existence.
        let account = self
            .store
            .find_by_identifier(identifier)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !account.status.is_active() {
            return Err(AccountError::AccountDisabled);
        }

        if !self
            .password_hasher
            .verify(password, &account.password_digest)
        {
            return Err(AccountError::InvalidCredentials);
        }

        let issued = self.token_service.issue(account.id.0)?;

        // Intentionally lossy: a failed timestamp update never fails the login.
        if let Err(e) = self.store.record_login(account.id, Utc::now()).await {
            tracing::warn!(
                account_id = %account.id,
                error = %e,
                "Failed to record last login timestamp"
            );
        }

        Ok(AuthenticatedSession {
            expires_at: issued.expires_at(),
            token: issued.token,
            account,
        })
    }

    async fn create_account(
        &self,
        command: CreateAccountCommand,
    ) -> Result<Account, AccountError> {
        Self::check_password_policy(&command.password)?;

        let password_digest = self.password_hasher.hash(&command.password)?;

        let account = NewAccount {
            username: command.username,
            email: command.email,
            password_digest,
            status: AccountStatus::Active,
            created_at: Utc::now(),
        };

        self.store.create(account).await
    }

    async fn get_account(&self, id: AccountId) -> Result<Account, AccountError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn change_password(
        &self,
        id: AccountId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let account = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        if !self
            .password_hasher
            .verify(old_password, &account.password_digest)
        {
            return Err(AccountError::InvalidCredentials);
        }

        Self::check_password_policy(new_password)?;

        let digest = self.password_hasher.hash(new_password)?;
        self.store.update_password(id, digest).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::SigningSecret;
    use chrono::DateTime;
    use mockall::mock;

    use super::*;
    use crate::account::models::EmailAddress;
    use crate::account::models::Username;

    mock! {
        pub TestAccountStore {}

        #[async_trait]
        impl AccountStore for TestAccountStore {
            async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError>;
            async fn record_login(&self, id: AccountId, at: DateTime<Utc>) -> Result<(), AccountError>;
            async fn update_password(&self, id: AccountId, digest: String) -> Result<(), AccountError>;
        }
    }

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(&SigningSecret::new(
            "test-secret-key-for-jwt-signing-at-least-32-bytes",
        )))
    }

    fn account_with_password(id: i64, password: &str, status: AccountStatus) -> Account {
        let digest = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");

        Account {
            id: AccountId(id),
            username: Username::new("merchant".to_string()).unwrap(),
            email: EmailAddress::new("merchant@example.com".to_string()).unwrap(),
            password_digest: digest,
            status,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut store = MockTestAccountStore::new();
        let account = account_with_password(42, "correct_horse", AccountStatus::Active);

        store
            .expect_find_by_identifier()
            .withf(|identifier| identifier == "merchant")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));
        store
            .expect_record_login()
            .withf(|id, _| *id == AccountId(42))
            .times(1)
            .returning(|_, _| Ok(()));

        let tokens = token_service();
        let service = AccountService::new(Arc::new(store), Arc::clone(&tokens));

        let session = service
            .login("merchant", "correct_horse")
            .await
            .expect("Login failed");

        // The token must verify back to the same subject
        let claims = tokens.verify(&session.token).expect("Token did not verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(session.expires_at, claims.exp);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(session.account.id, AccountId(42));
    }

    #[tokio::test]
    async fn test_login_unknown_identifier() {
        let mut store = MockTestAccountStore::new();
        store
            .expect_find_by_identifier()
            .times(1)
            .returning(|_| Ok(None));
        store.expect_record_login().times(0);

        let service = AccountService::new(Arc::new(store), token_service());

        let result = service.login("nobody", "whatever").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut store = MockTestAccountStore::new();
        let account = account_with_password(42, "correct_horse", AccountStatus::Active);

        store
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));
        store.expect_record_login().times(0);

        let service = AccountService::new(Arc::new(store), token_service());

        // Same error class as an unknown identifier
        let result = service.login("merchant", "battery_staple").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_suspended_account() {
        let mut store = MockTestAccountStore::new();
        let account = account_with_password(42, "correct_horse", AccountStatus::Suspended);

        store
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));
        store.expect_record_login().times(0);

        let service = AccountService::new(Arc::new(store), token_service());

        let result = service.login("merchant", "correct_horse").await;
        assert!(matches!(result, Err(AccountError::AccountDisabled)));
    }

    #[tokio::test]
    async fn test_login_succeeds_when_recording_last_login_fails() {
        let mut store = MockTestAccountStore::new();
        let account = account_with_password(42, "correct_horse", AccountStatus::Active);

        store
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));
        store
            .expect_record_login()
            .times(1)
            .returning(|_, _| Err(AccountError::DatabaseError("connection reset".to_string())));

        let service = AccountService::new(Arc::new(store), token_service());

        let result = service.login("merchant", "correct_horse").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_account_hashes_password() {
        let mut store = MockTestAccountStore::new();

        store
            .expect_create()
            .withf(|account| {
                account.username.as_str() == "merchant"
                    && account.password_digest.starts_with("$argon2")
                    && account.status == AccountStatus::Active
            })
            .times(1)
            .returning(|account| {
                Ok(Account {
                    id: AccountId(1),
                    username: account.username,
                    email: account.email,
                    password_digest: account.password_digest,
                    status: account.status,
                    last_login: None,
                    created_at: account.created_at,
                })
            });

        let service = AccountService::new(Arc::new(store), token_service());

        let command = CreateAccountCommand::new(
            Username::new("merchant".to_string()).unwrap(),
            EmailAddress::new("merchant@example.com".to_string()).unwrap(),
            "secret_password".to_string(),
        );

        let account = service.create_account(command).await.expect("Create failed");
        assert!(account.password_digest.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_create_account_rejects_short_password() {
        let mut store = MockTestAccountStore::new();
        store.expect_create().times(0);

        let service = AccountService::new(Arc::new(store), token_service());

        let command = CreateAccountCommand::new(
            Username::new("merchant".to_string()).unwrap(),
            EmailAddress::new("merchant@example.com".to_string()).unwrap(),
            "short".to_string(),
        );

        let result = service.create_account(command).await;
        assert!(matches!(
            result,
            Err(AccountError::PasswordTooShort { min: 6 })
        ));
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let mut store = MockTestAccountStore::new();
        let account = account_with_password(42, "old_password", AccountStatus::Active);

        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));
        store
            .expect_update_password()
            .withf(|id, digest| *id == AccountId(42) && digest.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AccountService::new(Arc::new(store), token_service());

        let result = service
            .change_password(AccountId(42), "old_password", "new_password")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_wrong_old_password() {
        let mut store = MockTestAccountStore::new();
        let account = account_with_password(42, "old_password", AccountStatus::Active);

        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));
        store.expect_update_password().times(0);

        let service = AccountService::new(Arc::new(store), token_service());

        let result = service
            .change_password(AccountId(42), "not_the_old_password", "new_password")
            .await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut store = MockTestAccountStore::new();
        store.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(store), token_service());

        let result = service.get_account(AccountId(7)).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }
}
