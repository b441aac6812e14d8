//! Key-value store port

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Writing would exceed the store's size limit.
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded {
        /// Size the store would have after the write
        needed: usize,
        /// Configured limit
        limit: usize,
    },

    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// The backing medium holds data that is not a valid store.
    #[error("storage is corrupt: {0}")]
    Corrupt(String),
}

/// Port for a synchronous string key-value store.
///
/// Values are JSON text. Implementations use interior mutability so a store
/// can be shared.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written or is full.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;

    /// Removes every key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn clear(&self) -> Result<(), StoreError>;
}
