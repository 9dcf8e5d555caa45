//! Key-value persistence abstraction.
//!
//! The client keeps session continuity (auth token, cached entities) in an
//! origin-scoped key-value medium. Only `get`/`set`/`remove` semantics are
//! required; durability is the implementation's concern.
//!
//! Access is synchronous: writes happen inside a reducer step while the
//! store's write lock is held, so they are applied in action order.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`] implementation
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded
    #[error("storage serialization failed: {0}")]
    Serialization(String),

    /// The key is not usable by this backend
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The medium is not available (e.g. poisoned lock, read-only medium)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous string key-value store
///
/// # Example
///
/// ```ignore
/// storage.set("auth_token", "abc123")?;
/// assert_eq!(storage.get("auth_token")?.as_deref(), Some("abc123"));
/// storage.remove("auth_token")?;
/// ```
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
