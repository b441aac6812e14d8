//! Key-value store persisted as a single JSON file.
//!
//! The file holds one JSON object mapping each key to its stored text:
//!
//! ```json
//! {
//!   "antiposta_theme": "\"dark\""
//! }
//! ```
//!
//! Every mutation rewrites the whole file through a temporary sibling and a
//! rename, so a crash never leaves a half-written store.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use antiposta_application::ports::{KeyValueStore, StoreError};

type Items = BTreeMap<String, String>;

/// File name used inside the data directory.
pub const STORE_FILE_NAME: &str = "storage.json";

/// A [`KeyValueStore`] backed by one JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    quota: Option<usize>,
    items: Mutex<Items>,
}

impl JsonFileStore {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Corrupt` if it is not a
    /// JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<Items>(&content)
                .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Items::new(),
            Err(e) => return Err(io_error(&path, &e)),
        };

        tracing::debug!(path = %path.display(), keys = items.len(), "Opened file store");

        Ok(Self {
            path,
            quota: None,
            items: Mutex::new(items),
        })
    }

    /// Opens `storage.json` inside `dir`.
    ///
    /// # Errors
    ///
    /// See [`JsonFileStore::open`].
    pub fn open_in(dir: &Path) -> Result<Self, StoreError> {
        Self::open(dir.join(STORE_FILE_NAME))
    }

    /// Limits the total size of keys and values, in bytes.
    #[must_use]
    pub const fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Items>, StoreError> {
        self.items
            .lock()
            .map_err(|_| StoreError::Io("store lock poisoned".to_string()))
    }

    fn check_quota(&self, items: &Items) -> Result<(), StoreError> {
        let Some(limit) = self.quota else {
            return Ok(());
        };
        let needed: usize = items.iter().map(|(k, v)| k.len() + v.len()).sum();
        if needed > limit {
            return Err(StoreError::QuotaExceeded { needed, limit });
        }
        Ok(())
    }

    /// Applies `change` to a copy of the items, then persists and commits it.
    fn mutate(&self, change: impl FnOnce(&mut Items)) -> Result<(), StoreError> {
        let mut items = self.lock()?;
        let mut next = items.clone();
        change(&mut next);

        self.check_quota(&next)?;
        self.persist(&next)?;

        *items = next;
        Ok(())
    }

    fn persist(&self, items: &Items) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, &e))?;
        }

        let mut content = serde_json::to_string_pretty(items)
            .map_err(|e| StoreError::Io(format!("serialization failed: {e}")))?;
        content.push('\n');

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| io_error(&tmp, &e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, &e))
    }
}

fn io_error(path: &Path, error: &io::Error) -> StoreError {
    StoreError::Io(format!("{}: {error}", path.display()))
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.mutate(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.mutate(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.mutate(BTreeMap::clear)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open_in(dir.path()).unwrap();

        assert_eq!(store.get_item("anything").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set_item("k", "[1,2]").unwrap();
        store.set_item("gone", "1").unwrap();
        store.remove_item("gone").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get_item("k").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(reopened.get_item("gone").unwrap(), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open_in(dir.path()).unwrap();
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();

        store.clear().unwrap();

        assert_eq!(store.get_item("a").unwrap(), None);
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "{}\n");
    }

    #[test]
    fn test_quota_rejects_write_and_keeps_old_value() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open_in(dir.path()).unwrap().with_quota(8);

        store.set_item("k", "1234").unwrap();
        let err = store.set_item("k", "123456789").unwrap_err();

        assert_eq!(
            err,
            StoreError::QuotaExceeded {
                needed: 10,
                limit: 8
            }
        );
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        fs::write(&path, "[not an object]").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }
}
