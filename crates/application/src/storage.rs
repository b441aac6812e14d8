//! Storage adapter over the key-value store port.
//!
//! Every failure is logged and swallowed: getters fall back to `None` (or the
//! collection's empty default) and mutators report `false`.

use std::sync::Arc;

use antiposta_domain::{Collection, Environment, HistoryEntry, RequestHistory, Theme};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ports::KeyValueStore;

/// Application name used as the key prefix when none is configured.
pub const DEFAULT_APP_NAME: &str = "antiposta";

/// The four keys the workbench persists under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Saved request collections
    pub collections: String,
    /// Variable environments
    pub environments: String,
    /// Request history
    pub history: String,
    /// Theme name
    pub theme: String,
}

impl StorageKeys {
    /// Builds the keys `<prefix>_collections`, `<prefix>_environments`, and so on.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            collections: format!("{prefix}_collections"),
            environments: format!("{prefix}_environments"),
            history: format!("{prefix}_history"),
            theme: format!("{prefix}_theme"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_APP_NAME)
    }
}

/// Typed, failure-tolerant access to the persistent store.
pub struct StorageAdapter<S: KeyValueStore> {
    store: Arc<S>,
    keys: StorageKeys,
}

impl<S: KeyValueStore> Clone for StorageAdapter<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            keys: self.keys.clone(),
        }
    }
}

#[allow(clippy::unused_async)]
impl<S: KeyValueStore> StorageAdapter<S> {
    /// Creates an adapter using the given keys.
    #[must_use]
    pub const fn new(store: Arc<S>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Returns the keys in use.
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Reads and deserializes the value under `key`.
    ///
    /// Returns `None` if the key is absent, the store fails, or the stored
    /// text is not valid JSON for `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.store.get_item(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(key, error = %e, "Error reading from storage");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(key, error = %e, "Error reading from storage");
                None
            }
        }
    }

    /// Serializes `value` as JSON and stores it under `key`.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(|e| e.to_string())
            .and_then(|text| self.store.set_item(key, &text).map_err(|e| e.to_string()));

        match result {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(key, %error, "Error writing to storage");
                false
            }
        }
    }

    /// Removes `key`.
    pub async fn remove(&self, key: &str) -> bool {
        match self.store.remove_item(key) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key, error = %e, "Error removing from storage");
                false
            }
        }
    }

    /// Removes every key in the store.
    pub async fn clear(&self) -> bool {
        match self.store.clear() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Error clearing storage");
                false
            }
        }
    }

    /// Returns the saved collections, empty if none.
    pub async fn get_collections(&self) -> Vec<Collection> {
        self.get(&self.keys.collections).await.unwrap_or_default()
    }

    /// Replaces the saved collections.
    pub async fn save_collections(&self, collections: &[Collection]) -> bool {
        self.set(&self.keys.collections, collections).await
    }

    /// Returns the saved environments, empty if none.
    pub async fn get_environments(&self) -> Vec<Environment> {
        self.get(&self.keys.environments).await.unwrap_or_default()
    }

    /// Replaces the saved environments.
    pub async fn save_environments(&self, environments: &[Environment]) -> bool {
        self.set(&self.keys.environments, environments).await
    }

    /// Returns the request history, newest first, empty if none.
    pub async fn get_history(&self) -> Vec<HistoryEntry> {
        self.get(&self.keys.history).await.unwrap_or_default()
    }

    /// Replaces the request history.
    pub async fn save_history(&self, history: &[HistoryEntry]) -> bool {
        self.set(&self.keys.history, history).await
    }

    /// Prepends `entry` to the history, keeping at most `limit` entries.
    pub async fn append_history(&self, entry: HistoryEntry, limit: usize) -> bool {
        let mut history = RequestHistory::from_entries(self.get_history().await, limit);
        history.add(entry);
        self.save_history(&history.into_entries()).await
    }

    /// Returns the saved theme, light if none.
    pub async fn get_theme(&self) -> Theme {
        self.get(&self.keys.theme).await.unwrap_or_default()
    }

    /// Stores the theme.
    pub async fn save_theme(&self, theme: Theme) -> bool {
        self.set(&self.keys.theme, &theme).await
    }
}
