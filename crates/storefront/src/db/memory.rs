//! In-process store.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{Store, StoreError, StoreKey};

/// A store held entirely in memory.
///
/// Each test builds its own instance, so cases never share state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<BTreeMap<StoreKey, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Whether no record is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.records.borrow().get(&key).cloned())
    }

    fn put_many(&self, entries: Vec<(StoreKey, String)>) -> Result<(), StoreError> {
        self.records.borrow_mut().extend(entries);
        Ok(())
    }

    fn delete(&self, key: StoreKey) -> Result<(), StoreError> {
        self.records.borrow_mut().remove(&key);
        Ok(())
    }
}
