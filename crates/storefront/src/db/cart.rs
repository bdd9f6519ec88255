//! Cart repository.

use super::{Store, StoreError, StoreKey, encode, read_or_default, write};
use crate::models::Cart;

/// Repository for the `cart` record.
pub struct CartRepository<'a> {
    store: &'a dyn Store,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Load the cart. Missing or malformed data yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    pub fn load(&self) -> Result<Cart, StoreError> {
        read_or_default(self.store, StoreKey::Cart)
    }

    /// Replace the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        write(self.store, StoreKey::Cart, cart)
    }

    /// Encode the cart for a multi-record commit.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` if serialization fails.
    pub fn entry(cart: &Cart) -> Result<(StoreKey, String), StoreError> {
        encode(StoreKey::Cart, cart)
    }
}
