use contracts::domain::a001_questionnaire::FormTemplate;
use contracts::shared::config::SurveyConfig;
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Fetch every available questionnaire; an empty list is an error
pub async fn fetch_templates(config: &SurveyConfig) -> Result<Vec<FormTemplate>, String> {
    let response = Request::get(&api_url(config, "/cuestionarios/"))
        .send()
        .await
        .map_err(|e| format!("Error al cargar los formularios: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "Error al cargar los formularios: HTTP {}",
            response.status()
        ));
    }

    let templates: Vec<FormTemplate> = response
        .json()
        .await
        .map_err(|e| format!("Error al cargar los formularios: {}", e))?;

    if templates.is_empty() {
        return Err("No se encontraron formularios disponibles.".to_string());
    }

    for template in &templates {
        if let Err(e) = template.validate() {
            log::warn!("Questionnaire '{}' looks malformed: {}", template.id, e);
        }
    }

    log::info!("Loaded {} questionnaires", templates.len());
    Ok(templates)
}
