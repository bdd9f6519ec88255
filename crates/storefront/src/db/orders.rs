//! Order log repository.
//!
//! The log is append-only and has no save method. Checkout is its only
//! writer and commits it together with the catalog and cart through
//! [`OrderRepository::entry`].

use super::{Store, StoreError, StoreKey, encode, read_or_default};
use crate::models::OrderLog;

/// Repository for the `orders` record.
pub struct OrderRepository<'a> {
    store: &'a dyn Store,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Load the order log.
    ///
    /// Entries that do not decode are hidden from readers but kept in the log,
    /// so the next commit writes them back untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    pub fn load(&self) -> Result<OrderLog, StoreError> {
        let log: OrderLog = read_or_default(self.store, StoreKey::Orders)?;
        if log.unreadable() > 0 {
            tracing::warn!(unreadable = log.unreadable(), "Keeping undecodable orders");
        }
        Ok(log)
    }

    /// Encode the log for a multi-record commit.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` if serialization fails.
    pub fn entry(log: &OrderLog) -> Result<(StoreKey, String), StoreError> {
        encode(StoreKey::Orders, log)
    }
}
