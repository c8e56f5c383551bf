use contracts::shared::fingerprint::{fingerprint, DeviceTraits, INSTALL_ID_KEY};
use contracts::shared::storage::StateStorage;
use web_sys::window;

/// Per-install id, created on first use
fn install_id(storage: &dyn StateStorage) -> String {
    if let Some(id) = storage.get_item(INSTALL_ID_KEY).filter(|id| !id.is_empty()) {
        return id;
    }
    let id = uuid::Uuid::new_v4().to_string();
    storage.set_item(INSTALL_ID_KEY, &id);
    id
}

/// Collect what the browser exposes; missing traits stay empty
pub fn device_traits(storage: &dyn StateStorage) -> DeviceTraits {
    let mut traits = DeviceTraits {
        timezone_offset: js_sys::Date::new_0().get_timezone_offset() as i32,
        install_id: install_id(storage),
        ..DeviceTraits::default()
    };

    if let Some(window) = window() {
        let navigator = window.navigator();
        traits.user_agent = navigator.user_agent().unwrap_or_default();
        traits.language = navigator.language().unwrap_or_default();
        traits.platform = navigator.platform().unwrap_or_default();

        if let Ok(screen) = window.screen() {
            traits.screen_width = screen.width().unwrap_or_default();
            traits.screen_height = screen.height().unwrap_or_default();
        }
    }
    traits
}

/// Fingerprint sent with every submission
pub fn device_fingerprint(storage: &dyn StateStorage) -> String {
    let fp = fingerprint(&device_traits(storage));
    log::debug!("Device fingerprint {}", fp);
    fp
}
