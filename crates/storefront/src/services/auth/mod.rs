//! Account directory and sign-in.
//!
//! Accounts are looked up by email, ignoring case. Secrets are compared
//! exactly and stored as entered (demo-grade credentials).

mod error;
pub mod validation;

pub use error::AccountError;

use tracing::instrument;

use technova_core::{AccountId, CredentialSecret, Email, Role};

use crate::db::session::SessionRepository;
use crate::db::users::UserRepository;
use crate::db::{Store, StoreError};
use crate::models::{Account, NewAccount, Session};

/// Account directory service.
///
/// Handles registration, authentication and the session marker.
pub struct AccountDirectory<'a> {
    users: UserRepository<'a>,
    sessions: SessionRepository<'a>,
}

impl<'a> AccountDirectory<'a> {
    /// Create a new account directory.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self {
            users: UserRepository::new(store),
            sessions: SessionRepository::new(store),
        }
    }

    // =========================================================================
    // Directory
    // =========================================================================

    /// Register a customer account.
    ///
    /// The email is stored lower-cased, the id upper-cased, and the role is
    /// always `Customer`. Does not sign the account in; see [`Self::sign_up`].
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidEmail` if the email format is invalid.
    /// Returns `AccountError::DuplicateEmail` if the email is already registered.
    #[instrument(skip(self, new), fields(email = %new.email))]
    pub fn register(&self, new: NewAccount) -> Result<Account, AccountError> {
        let account = build_account(new, Role::Customer)?;
        let account = self.create(account)?;
        tracing::info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    /// Register a customer account and sign it in.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register`], plus `AccountError::Store` if the session
    /// cannot be written.
    pub fn sign_up(&self, new: NewAccount) -> Result<Account, AccountError> {
        let account = self.register(new)?;
        self.sessions.start(&account.email)?;
        Ok(account)
    }

    /// Store an account with an explicit role (admin console).
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidEmail` or `AccountError::DuplicateEmail`.
    pub fn insert_with_role(&self, new: NewAccount, role: Role) -> Result<Account, AccountError> {
        let account = build_account(new, role)?;
        self.create(account)
    }

    /// Find an account by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Store` if the directory cannot be read.
    pub fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.users.get_by_email(email)?)
    }

    /// All accounts in registration order.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Store` if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.users.list()?)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check an email/secret pair.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCredentials` if the email is unknown or
    /// the secret does not match exactly.
    pub fn authenticate(&self, email: &str, secret: &str) -> Result<Account, AccountError> {
        let account = self
            .users
            .get_by_email(email)?
            .ok_or(AccountError::InvalidCredentials)?;

        if !account.secret.verify(secret) {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Authenticate and start a session.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCredentials` on a bad email/secret pair.
    #[instrument(skip(self, secret))]
    pub fn login(&self, email: &str, secret: &str) -> Result<Account, AccountError> {
        let account = self.authenticate(email, secret).inspect_err(|_| {
            tracing::info!("Login rejected");
        })?;
        self.sessions.start(&account.email)?;
        tracing::info!(account_id = %account.id, "Logged in");
        Ok(account)
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Store` if the session cannot be removed.
    pub fn logout(&self) -> Result<(), AccountError> {
        self.sessions.end()?;
        tracing::info!("Logged out");
        Ok(())
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// The raw session marker.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Store` if the session cannot be read.
    pub fn session(&self) -> Result<Option<Session>, AccountError> {
        Ok(self.sessions.current()?)
    }

    /// The signed-in account, if the session resolves to one.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Store` if the session or directory cannot be read.
    pub fn current_account(&self) -> Result<Option<Account>, AccountError> {
        let Some(session) = self.sessions.current()? else {
            return Ok(None);
        };
        Ok(self.users.get_by_email(session.email.as_str())?)
    }

    /// The signed-in account, required.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NoActiveSession` if nobody is signed in or the
    /// session email has no account.
    pub fn require_account(&self) -> Result<Account, AccountError> {
        self.current_account()?.ok_or(AccountError::NoActiveSession)
    }

    fn create(&self, account: Account) -> Result<Account, AccountError> {
        self.users.create(account).map_err(|e| match e {
            StoreError::Conflict(_) => AccountError::DuplicateEmail,
            other => AccountError::Store(other),
        })
    }
}

fn build_account(new: NewAccount, role: Role) -> Result<Account, AccountError> {
    let email = Email::parse(&new.email)?;
    Ok(Account {
        id: AccountId::new(new.id.trim().to_uppercase()),
        name: new.name.trim().to_owned(),
        surname: new.surname.trim().to_owned(),
        email,
        secret: CredentialSecret::new(new.secret),
        role,
        address: new.address.trim().to_owned(),
    })
}
