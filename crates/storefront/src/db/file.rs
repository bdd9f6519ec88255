//! File-backed store.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Store, StoreError, StoreKey};

/// On-disk layout: record name to raw record text.
type Document = BTreeMap<String, String>;

/// A store persisted as one JSON document.
///
/// Every write rewrites the whole document to a sibling temp file and renames
/// it over the existing file, so a [`Store::put_many`] lands as a single visible
/// change. A document that cannot be decoded is treated as empty.
///
/// Only one process should use a given file at a time; concurrent writers can
/// lose each other's updates.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Document::new());
        }

        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Store document is malformed, starting from empty"
            );
            Document::new()
        }))
    }

    fn save(&self, document: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(document).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key.as_str()))
    }

    fn put_many(&self, entries: Vec<(StoreKey, String)>) -> Result<(), StoreError> {
        let mut document = self.load()?;
        for (key, value) in entries {
            document.insert(key.as_str().to_owned(), value);
        }
        self.save(&document)
    }

    fn delete(&self, key: StoreKey) -> Result<(), StoreError> {
        let mut document = self.load()?;
        if document.remove(key.as_str()).is_some() {
            self.save(&document)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data.json"));
        assert_eq!(store.get(StoreKey::Products).unwrap(), None);
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.json");

        FileStore::new(&path)
            .put(StoreKey::Cart, "[1]".to_string())
            .unwrap();

        let reopened = FileStore::new(&path);
        let cart = reopened.get(StoreKey::Cart).unwrap();
        assert_eq!(cart.as_deref(), Some("[1]"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_put_many_and_delete() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data.json"));

        store
            .put_many(vec![
                (StoreKey::Products, "[]".to_string()),
                (StoreKey::Orders, "[]".to_string()),
            ])
            .unwrap();
        store.delete(StoreKey::Products).unwrap();

        assert_eq!(store.get(StoreKey::Products).unwrap(), None);
        assert_eq!(store.get(StoreKey::Orders).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_corrupt_document_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "garbage{").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get(StoreKey::Session).unwrap(), None);

        store.put(StoreKey::Session, "{}".to_string()).unwrap();
        assert_eq!(store.get(StoreKey::Session).unwrap().as_deref(), Some("{}"));
    }
}
