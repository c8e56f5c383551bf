use serde::Deserialize;

use crate::domain::a002_sampling_unit::PhasePolicy;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SurveyConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct SamplingConfig {
    #[serde(default)]
    pub phase_policy: PhasePolicy,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PersistenceConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u32 {
    400
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "https://backendgesex-production.up.railway.app"

[sampling]
phase_policy = "user_assigned"

[persistence]
debounce_ms = 400
"#;

impl SurveyConfig {
    /// Base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

/// Load configuration
///
/// Search order:
/// 1. Bundled `config.toml` contents, when the frontend ships one
/// 2. Falls back to embedded default config
pub fn load_config(bundled: Option<&str>) -> anyhow::Result<SurveyConfig> {
    if let Some(contents) = bundled.filter(|c| !c.trim().is_empty()) {
        log::info!("Loading bundled config.toml");
        let config: SurveyConfig = toml::from_str(contents)?;
        return Ok(config);
    }

    log::info!("Using default embedded configuration");
    let config: SurveyConfig = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}
