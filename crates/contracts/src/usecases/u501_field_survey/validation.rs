//! Pre-submission checks; the first unmet requirement wins

use thiserror::Error;

use crate::domain::a001_questionnaire::FormTemplate;
use crate::domain::a002_sampling_unit::SAMPLE_SIZE;
use crate::domain::a003_census::CensusAttr;
use crate::domain::a004_phenology::Phase;
use crate::domain::a005_arthropod::{ArthropodAttr, ArthropodClass, InsectSpecies, MiteSpecies};
use crate::enums::MonitoringType;
use crate::shared::answer_map::AnswerMap;
use crate::shared::field_key::FieldKey;
use crate::shared::metadata::FieldAttribute;

use super::session::SurveySession;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Por favor selecciona un formulario")]
    NoTemplate,

    #[error("Formulario no encontrado")]
    TemplateNotFound,

    #[error("Por favor completa todos los campos de caracterización requeridos: {}", .0.join(", "))]
    MissingCharacterization(Vec<String>),

    #[error("Debe seleccionar un lote para el {0}")]
    NoLot(MonitoringType),

    #[error("Se esperaban {expected} plantas de muestreo y hay {found}")]
    WrongUnitCount { expected: usize, found: usize },

    #[error("Complete todos los datos de la planta {unit} ({label})")]
    IncompleteCensusUnit { unit: usize, label: String },

    #[error("La altura de la planta {unit} debe ser un número mayor a 0")]
    InvalidHeight { unit: usize },

    #[error("El diámetro de la planta {unit} debe ser un número mayor a 0")]
    InvalidDiameter { unit: usize },

    #[error("Seleccione la fase fenológica de la planta {unit}")]
    MissingPhase { unit: usize },

    #[error("Complete todos los datos de la planta {unit} (Fase {phase})")]
    IncompletePhenologyUnit { unit: usize, phase: Phase },

    #[error("Planta {unit}: {field} debe ser un número válido (cero o mayor)")]
    InvalidCount { unit: usize, field: &'static str },

    #[error("Planta {unit}: estado BBCH no válido para la fase {phase}")]
    InvalidBbch { unit: usize, phase: Phase },

    #[error("Planta {unit}: Debe seleccionar un tipo de insecto")]
    MissingInsectSpecies { unit: usize },

    #[error("Planta {unit}: Debe seleccionar un tipo de ácaro")]
    MissingMiteSpecies { unit: usize },

    #[error("Planta {unit}: Complete todos los datos de {species}")]
    IncompleteInsect { unit: usize, species: InsectSpecies },

    #[error("Planta {unit}: Complete todos los datos de {species}")]
    IncompleteMite { unit: usize, species: MiteSpecies },
}

pub type ValidationResult = Result<(), ValidationError>;

pub fn validate(session: &SurveySession, templates: &[FormTemplate]) -> ValidationResult {
    let id = session
        .template_id
        .as_deref()
        .ok_or(ValidationError::NoTemplate)?;
    let template = FormTemplate::find(templates, id).ok_or(ValidationError::TemplateNotFound)?;

    let missing: Vec<String> = template
        .characterization_fields()
        .filter(|name| !session.answers.is_filled(name))
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingCharacterization(missing));
    }

    match session.monitoring_type() {
        Some(MonitoringType::Poblacion) => validate_census(session),
        Some(MonitoringType::Fenologico) => validate_phenology(session),
        Some(MonitoringType::Artropodos) => validate_arthropods(session),
        Some(
            MonitoringType::Enfermedades
            | MonitoringType::Arvenses
            | MonitoringType::Biologicos
            | MonitoringType::Polinizadores,
        )
        | None => Ok(()),
    }
}

fn require_lot(session: &SurveySession, kind: MonitoringType, units: usize) -> ValidationResult {
    if session.lot.is_none() {
        return Err(ValidationError::NoLot(kind));
    }
    if units != SAMPLE_SIZE {
        return Err(ValidationError::WrongUnitCount {
            expected: SAMPLE_SIZE,
            found: units,
        });
    }
    Ok(())
}

fn validate_census(session: &SurveySession) -> ValidationResult {
    require_lot(session, MonitoringType::Poblacion, session.units.len())?;
    let answers = &session.answers;

    for (i, planta) in session.units.iter().enumerate() {
        let unit = i + 1;
        let key = |attr: CensusAttr| FieldKey::Census { unit, attr }.key();

        if !CensusAttr::all().iter().all(|attr| answers.is_filled(&key(*attr))) {
            return Err(ValidationError::IncompleteCensusUnit {
                unit,
                label: planta.label.clone(),
            });
        }

        let altura = CensusAttr::Altura;
        if altura.rules().check_number(answers.value(&key(altura))).is_err() {
            return Err(ValidationError::InvalidHeight { unit });
        }
        let diametro = CensusAttr::Diametro;
        if diametro.rules().check_number(answers.value(&key(diametro))).is_err() {
            return Err(ValidationError::InvalidDiameter { unit });
        }
    }
    Ok(())
}

fn validate_phenology(session: &SurveySession) -> ValidationResult {
    require_lot(session, MonitoringType::Fenologico, session.phenology_units.len())?;
    let answers = &session.answers;

    for (i, unit_state) in session.phenology_units.iter().enumerate() {
        if !unit_state.fase.is_set() {
            return Err(ValidationError::MissingPhase { unit: i + 1 });
        }
    }

    for (i, unit_state) in session.phenology_units.iter().enumerate() {
        let unit = i + 1;
        let phase = unit_state.fase;
        let attrs = phase.attributes();
        let key = |attr| FieldKey::Phenology { unit, attr }.key();

        if !attrs.iter().all(|attr| answers.is_filled(&key(*attr))) {
            return Err(ValidationError::IncompletePhenologyUnit { unit, phase });
        }

        for attr in attrs {
            let raw = answers.value(&key(*attr));
            match attr.bbch_codes() {
                Some(codes) => {
                    if !codes.iter().any(|(code, _)| *code == raw.trim()) {
                        return Err(ValidationError::InvalidBbch { unit, phase });
                    }
                }
                None => {
                    if attr.rules().check_number(raw).is_err() {
                        return Err(ValidationError::InvalidCount {
                            unit,
                            field: attr.label(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

/// Required attributes filled, then counts parsed
fn check_species(
    answers: &AnswerMap,
    unit: usize,
    attrs: &[ArthropodAttr],
    key: impl Fn(ArthropodAttr) -> String,
    incomplete: ValidationError,
) -> ValidationResult {
    let complete = attrs
        .iter()
        .filter(|attr| attr.rules().required)
        .all(|attr| answers.is_filled(&key(*attr)));
    if !complete {
        return Err(incomplete);
    }

    for attr in attrs.iter().filter(|attr| attr.is_count()) {
        if attr.rules().check_number(answers.value(&key(*attr))).is_err() {
            return Err(ValidationError::InvalidCount {
                unit,
                field: attr.label(),
            });
        }
    }
    Ok(())
}

fn validate_arthropods(session: &SurveySession) -> ValidationResult {
    require_lot(session, MonitoringType::Artropodos, session.units.len())?;
    let answers = &session.answers;

    for unit in 1..=session.units.len() {
        let state = session.arthropod_unit(unit);

        for class in &state.classes {
            match class {
                ArthropodClass::Insecto => {
                    let species = state
                        .insect
                        .ok_or(ValidationError::MissingInsectSpecies { unit })?;
                    check_species(
                        answers,
                        unit,
                        species.attributes(),
                        |attr| FieldKey::Insect { unit, species, attr }.key(),
                        ValidationError::IncompleteInsect { unit, species },
                    )?;
                }
                ArthropodClass::Aracnido => {
                    let species = state
                        .mite
                        .ok_or(ValidationError::MissingMiteSpecies { unit })?;
                    check_species(
                        answers,
                        unit,
                        species.attributes(),
                        |attr| FieldKey::Mite { unit, species, attr }.key(),
                        ValidationError::IncompleteMite { unit, species },
                    )?;
                }
            }
        }
    }
    Ok(())
}
