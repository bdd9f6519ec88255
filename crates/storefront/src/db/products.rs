//! Product repository.

use technova_core::ProductId;

use super::{Store, StoreError, StoreKey, encode, read_each, write};
use crate::models::{Catalog, Product};

/// Repository for the `products` record.
pub struct ProductRepository<'a> {
    store: &'a dyn Store,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Load the catalog. Malformed entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    pub fn load(&self) -> Result<Catalog, StoreError> {
        Ok(Catalog::new(read_each(self.store, StoreKey::Products)?))
    }

    /// Replace the stored catalog.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the catalog cannot be written.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        write(self.store, StoreKey::Products, catalog)
    }

    /// Encode the catalog for a multi-record commit.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` if serialization fails.
    pub fn entry(catalog: &Catalog) -> Result<(StoreKey, String), StoreError> {
        encode(StoreKey::Products, catalog)
    }

    /// Look up a single product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    pub fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.load()?.find_by_id(id).cloned())
    }
}
