//! Local key-value persistence.
//!
//! # Records
//!
//! Every piece of storefront state lives in one named record:
//!
//! - `products` - the catalog, in insertion order
//! - `cart` - the current cart lines
//! - `users` - registered accounts
//! - `orders` - the append-only order log
//! - `session` - the signed-in email, if any
//!
//! Records are whole JSON values: a write replaces the entire record. Reads
//! are forgiving. A record that is missing, or whose text no longer decodes
//! into the expected shape, yields the caller's fallback and the bad data is
//! discarded (logged at `warn`).
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process, used by tests
//! - [`FileStore`] - a single JSON document on disk
//!
//! Components borrow a `&dyn Store` at construction; there is no global.

mod file;
mod memory;

pub mod cart;
pub mod orders;
pub mod products;
pub mod session;
pub mod users;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Names of the records the storefront keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreKey {
    Cart,
    Users,
    Products,
    Orders,
    Session,
}

impl StoreKey {
    /// Every record key.
    pub const ALL: [Self; 5] = [
        Self::Cart,
        Self::Users,
        Self::Products,
        Self::Orders,
        Self::Session,
    ];

    /// Name under which the record is stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Users => "users",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Session => "session",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the storage backend.
///
/// Malformed record contents are not an error; see [`read_or`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A uniqueness constraint would be violated (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A value could not be encoded for storage.
    #[error("failed to encode {key} record: {source}")]
    Encode {
        key: StoreKey,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw record storage.
///
/// Values are the JSON text of a record. Implementations are used from a
/// single thread of control and need no locking.
pub trait Store {
    /// Fetch the raw text of a record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backend cannot be read.
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError>;

    /// Replace several records in one step.
    ///
    /// Either every entry becomes visible or none does.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backend cannot be written.
    fn put_many(&self, entries: Vec<(StoreKey, String)>) -> Result<(), StoreError>;

    /// Delete a record. Missing records are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backend cannot be written.
    fn delete(&self, key: StoreKey) -> Result<(), StoreError>;

    /// Replace a single record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backend cannot be written.
    fn put(&self, key: StoreKey, value: String) -> Result<(), StoreError> {
        self.put_many(vec![(key, value)])
    }
}

/// Read a record, falling back when it is missing or malformed.
///
/// # Errors
///
/// Returns `StoreError::Io` only when the backend itself fails.
pub fn read_or<T: DeserializeOwned>(
    store: &dyn Store,
    key: StoreKey,
    fallback: T,
) -> Result<T, StoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(fallback);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(
                key = %key,
                error = %e,
                "Discarding malformed persisted record"
            );
            Ok(fallback)
        }
    }
}

/// Read a record, falling back to `T::default()`.
///
/// # Errors
///
/// Returns `StoreError::Io` only when the backend itself fails.
pub fn read_or_default<T: DeserializeOwned + Default>(
    store: &dyn Store,
    key: StoreKey,
) -> Result<T, StoreError> {
    read_or(store, key, T::default())
}

/// Read a list record entry by entry.
///
/// A record that is missing or not a JSON array yields an empty list. Entries
/// that do not decode into `T` are dropped individually, so one corrupt
/// product or account does not take the rest of the record with it.
///
/// # Errors
///
/// Returns `StoreError::Io` only when the backend itself fails.
pub fn read_each<T: DeserializeOwned>(
    store: &dyn Store,
    key: StoreKey,
) -> Result<Vec<T>, StoreError> {
    let entries: Vec<serde_json::Value> = read_or_default(store, key)?;
    let total = entries.len();

    let decoded: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if decoded.len() != total {
        tracing::warn!(
            key = %key,
            dropped = total - decoded.len(),
            "Discarding malformed entries"
        );
    }

    Ok(decoded)
}

/// Encode a value as a store entry without writing it.
///
/// Used to assemble multi-record commits for [`Store::put_many`].
///
/// # Errors
///
/// Returns `StoreError::Encode` if serialization fails.
pub fn encode<T: Serialize + ?Sized>(
    key: StoreKey,
    value: &T,
) -> Result<(StoreKey, String), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
    Ok((key, raw))
}

/// Encode and write a single record.
///
/// # Errors
///
/// Returns `StoreError` if encoding or the backend write fails.
pub fn write<T: Serialize + ?Sized>(
    store: &dyn Store,
    key: StoreKey,
    value: &T,
) -> Result<(), StoreError> {
    let (key, raw) = encode(key, value)?;
    store.put(key, raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_reads_fallback() {
        let store = MemoryStore::new();
        let value: Vec<u32> = read_or(&store, StoreKey::Orders, vec![7]).unwrap();
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_malformed_record_reads_fallback() {
        let store = MemoryStore::new();
        store.put(StoreKey::Cart, "{not json".to_string()).unwrap();
        let value: Vec<u32> = read_or_default(&store, StoreKey::Cart).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_wrong_shape_reads_fallback() {
        let store = MemoryStore::new();
        store
            .put(StoreKey::Cart, r#"{"unexpected": true}"#.to_string())
            .unwrap();
        let value: Vec<u32> = read_or_default(&store, StoreKey::Cart).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        write(&store, StoreKey::Products, &vec![1_u32, 2, 3]).unwrap();
        let value: Vec<u32> = read_or_default(&store, StoreKey::Products).unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_read_each_skips_bad_entries() {
        let store = MemoryStore::new();
        store
            .put(StoreKey::Users, r#"[1, "two", 3, null]"#.to_string())
            .unwrap();
        let value: Vec<u32> = read_each(&store, StoreKey::Users).unwrap();
        assert_eq!(value, vec![1, 3]);
    }

    #[test]
    fn test_key_names() {
        let names: Vec<&str> = StoreKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["cart", "users", "products", "orders", "session"]);
    }
}
