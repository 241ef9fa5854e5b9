//! Browser `localStorage` implementation for WebAssembly.

use super::{Storage, StorageError, StorageResult};

/// `window.localStorage`-backed storage.
///
/// Not Send/Sync: browser handles are only valid on the main thread.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

fn js_error(context: &str, e: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Other(format!("{}: {:?}", context, e))
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn new() -> StorageResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| js_error("localStorage error", e))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;
        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.inner.set_item(key, value).map_err(|e| {
            // Quota exceeded surfaces here
            js_error("Failed to write", e)
        })
    }

    fn load(&self, key: &str) -> StorageResult<String> {
        self.inner
            .get_item(key)
            .map_err(|e| js_error("Failed to read", e))?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner
            .remove_item(key)
            .map_err(|e| js_error("Failed to delete", e))
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let len = self.inner.length().map_err(|e| js_error("Failed to count", e))?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = self.inner.key(index).map_err(|e| js_error("Failed to list", e))? {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner
            .get_item(key)
            .map(|value| value.is_some())
            .map_err(|e| js_error("Failed to read", e))
    }
}
