use contracts::shared::storage::StateStorage;
use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// `localStorage` of the current window.
///
/// Every call is a no-op when storage is unavailable (private mode, quota).
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl StateStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = get_local_storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to persist '{}'", key);
            }
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
