//! Browser LocalStorage store

use super::KeyValueStore;
use crate::error::StoreError;

/// Thin wrapper over `window.localStorage`
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Backend("LocalStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

fn backend_error(err: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Backend(format!("{err:?}"))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(backend_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(backend_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(backend_error)
    }
}
