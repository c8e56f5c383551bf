//! API utilities for frontend-backend communication

use contracts::shared::config::SurveyConfig;

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url(&config, "/cuestionarios/");
/// ```
pub fn api_url(config: &SurveyConfig, path: &str) -> String {
    format!("{}{}", config.api_base(), path)
}
