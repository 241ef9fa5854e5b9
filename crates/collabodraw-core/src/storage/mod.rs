//! Storage abstraction for persistence.

mod autosave;
mod memory;
mod repository;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use autosave::{AUTO_SAVE_DESCRIPTION, AutoSaveManager, DEFAULT_AUTOSAVE_INTERVAL_SECS, MANUAL_SAVE_DESCRIPTION};
pub use memory::MemoryStorage;
pub use repository::{BOARD_KEY, BoardRepository, MAX_VERSIONS, USER_KEY, VERSIONS_KEY, Version};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value backend holding serialized JSON strings.
///
/// Native implementations must be Send + Sync. On WASM these bounds are
/// relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Read the value under `key`; `NotFound` if absent.
    fn load(&self, key: &str) -> StorageResult<String>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Key-value backend holding serialized JSON strings (WASM version).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Read the value under `key`; `NotFound` if absent.
    fn load(&self, key: &str) -> StorageResult<String>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Platform storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = LocalStorage;

/// Create the platform storage backend in its default location.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<PlatformStorage> {
    FileStorage::default_location()
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<PlatformStorage> {
    LocalStorage::new()
}
