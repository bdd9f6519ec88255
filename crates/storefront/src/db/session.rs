//! Session marker.
//!
//! Records which account, if any, is signed in. Starting a session
//! overwrites the previous one; there is no expiry.

use technova_core::Email;

use super::{Store, StoreError, StoreKey, read_or, write};
use crate::models::Session;

/// Repository for the `session` record.
pub struct SessionRepository<'a> {
    store: &'a dyn Store,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Mark `email` as signed in, replacing any existing session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the session cannot be written.
    pub fn start(&self, email: &Email) -> Result<Session, StoreError> {
        let session = Session {
            email: email.clone(),
        };
        write(self.store, StoreKey::Session, &session)?;
        tracing::debug!(email = %email, "Session started");
        Ok(session)
    }

    /// The current session, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    pub fn current(&self) -> Result<Option<Session>, StoreError> {
        read_or(self.store, StoreKey::Session, None)
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the session cannot be removed.
    pub fn end(&self) -> Result<(), StoreError> {
        self.store.delete(StoreKey::Session)?;
        tracing::debug!("Session ended");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_start_current_end() {
        let store = MemoryStore::new();
        let sessions = SessionRepository::new(&store);
        assert!(sessions.current().unwrap().is_none());

        let first = Email::parse("a@gmail.com").unwrap();
        let second = Email::parse("b@gmail.com").unwrap();
        sessions.start(&first).unwrap();
        sessions.start(&second).unwrap();
        assert_eq!(
            sessions.current().unwrap().unwrap().email.as_str(),
            "b@gmail.com"
        );

        sessions.end().unwrap();
        assert!(sessions.current().unwrap().is_none());
    }

    #[test]
    fn test_malformed_session_reads_as_signed_out() {
        let store = MemoryStore::new();
        store
            .put(StoreKey::Session, r#"{"email":"not-an-email"}"#.to_string())
            .unwrap();
        assert!(SessionRepository::new(&store).current().unwrap().is_none());
    }
}
