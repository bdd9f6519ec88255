//! User repository.
//!
//! Accounts are stored as one list under the `users` record. Emails are
//! unique ignoring case.

use super::{Store, StoreError, StoreKey, read_each, read_or, write};
use crate::models::Account;

/// Repository for the `users` record.
pub struct UserRepository<'a> {
    store: &'a dyn Store,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// All accounts in registration order. Malformed entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    pub fn list(&self) -> Result<Vec<Account>, StoreError> {
        read_each(self.store, StoreKey::Users)
    }

    /// Whether the `users` record holds a list, even an empty one.
    ///
    /// A missing record, or one that is not a JSON list, counts as absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    pub fn exists(&self) -> Result<bool, StoreError> {
        let stored: Option<Vec<serde_json::Value>> = read_or(self.store, StoreKey::Users, None)?;
        Ok(stored.is_some())
    }

    /// Get an account by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    pub fn get_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|account| account.email.matches(email)))
    }

    /// Append a new account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the email is already registered.
    /// Returns `StoreError` for backend failures.
    pub fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.list()?;

        if accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }

        accounts.push(account.clone());
        write(self.store, StoreKey::Users, &accounts)?;
        Ok(account)
    }
}
