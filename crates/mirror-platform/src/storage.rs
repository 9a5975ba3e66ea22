//! Storage backends for the small config blob.
//!
//! The config is the only thing persisted — session transcripts never are.
//! `BrowserStorage` wraps `window.localStorage`; `MemoryStorage` is the
//! volatile fallback for environments without a window (tests, workers).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use mirror_core::ports::StoragePort;
use mirror_types::{MirrorError, Result};

/// Persistent storage over the browser's `localStorage`.
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn new() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| MirrorError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|_| MirrorError::Storage("localStorage unavailable".to_string()))?
            .ok_or_else(|| MirrorError::Storage("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl StoragePort for BrowserStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|_| MirrorError::Storage(format!("get failed for {}", key)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|_| MirrorError::Storage(format!("set failed for {}", key)))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|_| MirrorError::Storage(format!("delete failed for {}", key)))
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}

/// In-memory storage backend.
/// Fastest option but not persistent across page reloads.
pub struct MemoryStorage {
    data: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            data: RefCell::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl StoragePort for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

/// Pick the best available backend: localStorage when the browser grants
/// it, memory otherwise.
pub fn auto_storage() -> Rc<dyn StoragePort> {
    match BrowserStorage::new() {
        Ok(s) => Rc::new(s),
        Err(e) => {
            log::warn!("localStorage unavailable: {}. Falling back to memory.", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
