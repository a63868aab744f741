use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthenticatedSession;
use crate::account::models::CreateAccountCommand;
use crate::account::models::NewAccount;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Authenticate an account and issue an access token.
    ///
    /// # Arguments
    /// * `identifier` - Username or email address
    /// * `password` - Plaintext password
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password
    ///   (indistinguishable by design)
    /// * `AccountDisabled` - Account status is not active
    /// * `DatabaseError` - Store operation failed
    async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AccountError>;

    /// Register a new account with a hashed credential.
    ///
    /// # Errors
    /// * `PasswordTooShort` - Password below the minimum length
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn create_account(&self, command: CreateAccountCommand)
        -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_account(&self, id: AccountId) -> Result<Account, AccountError>;

    /// Replace the account's credential after verifying the old password.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `InvalidCredentials` - Old password does not match
    /// * `PasswordTooShort` - New password below the minimum length
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn change_password(
        &self,
        id: AccountId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// The narrow surface the authentication core needs; listing and
/// administrative queries live elsewhere.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Persist a new account; the store assigns the identifier.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account by username or email in a single lookup.
    ///
    /// # Returns
    /// Optional account entity (None if neither matches)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_identifier(&self, identifier: &str)
        -> Result<Option<Account>, AccountError>;

    /// Record the last successful login timestamp.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn record_login(&self, id: AccountId, at: DateTime<Utc>) -> Result<(), AccountError>;

    /// Replace the stored password digest wholesale.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password(&self, id: AccountId, digest: String) -> Result<(), AccountError>;
}
