//! Key/value persistence used by the survey session
//!
//! The browser implementation lives in the frontend (localStorage); this
//! module only knows the trait, JSON helpers and an in-memory store for tests.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;

pub trait StateStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Read a JSON entry.
///
/// A missing entry yields `None`. A corrupt one is logged, removed and also
/// yields `None` so the caller falls back to its default.
pub fn load_json<T: DeserializeOwned>(storage: &dyn StateStorage, key: &str) -> Option<T> {
    let raw = storage.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Dropping corrupt persisted entry '{}': {}", key, e);
            storage.remove_item(key);
            None
        }
    }
}

/// Write a JSON entry; serialization failures are logged and skipped
pub fn save_json<T: Serialize + ?Sized>(storage: &dyn StateStorage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json),
        Err(e) => log::error!("Failed to serialize '{}': {}", key, e),
    }
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StateStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let storage = MemoryStorage::new();
        save_json(&storage, "lista", &vec![1, 2, 3]);
        assert_eq!(load_json::<Vec<i32>>(&storage, "lista"), Some(vec![1, 2, 3]));
        assert_eq!(load_json::<Vec<i32>>(&storage, "otra"), None);
    }

    #[test]
    fn test_corrupt_entry_is_removed() {
        let storage = MemoryStorage::new();
        storage.set_item("lista", "{not json");
        assert_eq!(load_json::<Vec<i32>>(&storage, "lista"), None);
        assert!(storage.get_item("lista").is_none());
    }
}
