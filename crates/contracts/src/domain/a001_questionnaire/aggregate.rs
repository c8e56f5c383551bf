use serde::{Deserialize, Serialize};

use crate::shared::metadata::Choice;

pub const DAY_CONDITION_CHOICES: &[Choice] = &[
    ("soleado", "Soleado"),
    ("nublado", "Nublado"),
    ("lluvia", "Lluvia"),
];

/// Questionnaire template served by `GET /cuestionarios/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTemplate {
    pub id: String,
    pub caracterizacion_template: CharacterizationTemplate,
    #[serde(default)]
    pub censo: SectionTemplate,
    #[serde(default)]
    pub fenologico: SectionTemplate,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharacterizationTemplate {
    #[serde(default)]
    pub campos_requeridos: Vec<String>,
    #[serde(default)]
    pub tipo_participante: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionTemplate {
    #[serde(default)]
    pub campos_requeridos: Vec<String>,
}

/// How a characterization field is edited, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterizationFieldKind {
    /// "¿Qué se va a monitorear?": drives the monitoring type
    MonitoringType,
    /// "Condiciones del día": weather select
    DayConditions,
    Text,
}

impl CharacterizationFieldKind {
    pub fn classify(name: &str) -> Self {
        let lower = name.to_lowercase();
        if (lower.contains("qué") || lower.contains("que")) && lower.contains("monitorear") {
            Self::MonitoringType
        } else if lower.contains("condiciones") && (lower.contains("día") || lower.contains("dia")) {
            Self::DayConditions
        } else {
            Self::Text
        }
    }
}

/// Fields that select the lot are handled by the lot selector, not the characterization form
fn is_lot_field(name: &str) -> bool {
    name.to_lowercase().contains("lote")
}

impl FormTemplate {
    pub fn participant_type(&self) -> &str {
        &self.caracterizacion_template.tipo_participante
    }

    /// Characterization fields in template order, lot fields excluded
    pub fn characterization_fields(&self) -> impl Iterator<Item = &str> {
        self.caracterizacion_template
            .campos_requeridos
            .iter()
            .map(String::as_str)
            .filter(|name| !is_lot_field(name))
    }

    /// Name of the field that chooses the monitoring type, if the template has one
    pub fn monitoring_field(&self) -> Option<&str> {
        self.characterization_fields()
            .find(|name| CharacterizationFieldKind::classify(name) == CharacterizationFieldKind::MonitoringType)
    }

    /// Look a template up by id in the loaded list
    pub fn find<'a>(templates: &'a [FormTemplate], id: &str) -> Option<&'a FormTemplate> {
        templates.iter().find(|t| t.id == id)
    }

    /// Validate template contents
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("El formulario no tiene identificador".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(fields: &[&str]) -> FormTemplate {
        FormTemplate {
            id: "f1".into(),
            caracterizacion_template: CharacterizationTemplate {
                campos_requeridos: fields.iter().map(|s| s.to_string()).collect(),
                tipo_participante: "Productor".into(),
            },
            censo: SectionTemplate::default(),
            fenologico: SectionTemplate::default(),
        }
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let json = r#"{"id":"abc","caracterizacion_template":{"campos_requeridos":["Nombre"],"tipo_participante":"Técnico"}}"#;
        let parsed: FormTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, "abc");
        assert!(parsed.censo.campos_requeridos.is_empty());
        assert!(parsed.fenologico.campos_requeridos.is_empty());
        assert_eq!(parsed.participant_type(), "Técnico");
    }

    #[test]
    fn test_lot_fields_are_excluded() {
        let t = template(&["Nombre", "Lote a monitorear", "¿Qué se va a monitorear?"]);
        let fields: Vec<_> = t.characterization_fields().collect();
        assert_eq!(fields, vec!["Nombre", "¿Qué se va a monitorear?"]);
        assert_eq!(t.monitoring_field(), Some("¿Qué se va a monitorear?"));
    }

    #[test]
    fn test_classify_field_names() {
        assert_eq!(
            CharacterizationFieldKind::classify("¿QUÉ se va a MONITOREAR?"),
            CharacterizationFieldKind::MonitoringType
        );
        assert_eq!(
            CharacterizationFieldKind::classify("Condiciones del día"),
            CharacterizationFieldKind::DayConditions
        );
        assert_eq!(
            CharacterizationFieldKind::classify("Nombre del productor"),
            CharacterizationFieldKind::Text
        );
    }

    #[test]
    fn test_find_by_id() {
        let list = vec![template(&[]), FormTemplate { id: "f2".into(), ..template(&[]) }];
        assert_eq!(FormTemplate::find(&list, "f2").map(|t| t.id.as_str()), Some("f2"));
        assert!(FormTemplate::find(&list, "zz").is_none());
    }
}
