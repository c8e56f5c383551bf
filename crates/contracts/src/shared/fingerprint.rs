use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Storage key of the per-install id mixed into the fingerprint
pub const INSTALL_ID_KEY: &str = "encuesta_dispositivo";

/// Browser traits the device fingerprint is derived from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceTraits {
    pub user_agent: String,
    pub language: String,
    pub platform: String,
    pub screen_width: i32,
    pub screen_height: i32,
    /// Minutes, as `Date.getTimezoneOffset()` reports them
    pub timezone_offset: i32,
    pub install_id: String,
}

/// Opaque device id: hex SHA-256 over the traits
pub fn fingerprint(traits: &DeviceTraits) -> String {
    let screen = format!("{}x{}", traits.screen_width, traits.screen_height);
    let offset = traits.timezone_offset.to_string();

    let mut hasher = Sha256::new();
    for part in [
        traits.user_agent.as_str(),
        traits.language.as_str(),
        traits.platform.as_str(),
        screen.as_str(),
        offset.as_str(),
        traits.install_id.as_str(),
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}
