use contracts::shared::config::SurveyConfig;
use contracts::usecases::u501_field_survey::SurveyPayload;
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// POST the assembled answers
pub async fn submit_survey(config: &SurveyConfig, payload: &SurveyPayload) -> Result<(), String> {
    let response = Request::post(&api_url(config, "/Respuestas/"))
        .json(payload)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Error al enviar respuestas: {}", e))?;

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!(
            "Error al enviar respuestas: HTTP {} {}",
            response.status(),
            body.trim()
        ));
    }
    Ok(())
}
