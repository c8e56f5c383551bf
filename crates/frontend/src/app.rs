use contracts::shared::config::load_config;
use leptos::prelude::*;

use crate::shared::components::ErrorDisplay;
use crate::usecases::u501_field_survey::FieldSurveyPage;

/// `config.toml` shipped with the bundle
const BUNDLED_CONFIG: &str = include_str!("../config.toml");

#[component]
pub fn App() -> impl IntoView {
    let config = load_config(Some(BUNDLED_CONFIG)).or_else(|e| {
        log::error!("Invalid bundled config.toml, using defaults: {}", e);
        load_config(None)
    });

    match config {
        Ok(config) => view! { <FieldSurveyPage config=config /> }.into_any(),
        Err(e) => view! { <ErrorDisplay error=format!("Configuración inválida: {}", e) /> }.into_any(),
    }
}
