//! Assembles the `POST /Respuestas/` payload from a validated session

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::a001_questionnaire::FormTemplate;
use crate::domain::a003_census::{CensusAttr, CensusData, CensusPlantData};
use crate::domain::a004_phenology::{PhenologyData, PhenologyPlantData};
use crate::domain::a005_arthropod::{
    ArthropodAttr, ArthropodClass, ArthropodData, ArthropodPlantData, InsectObservation,
    MiteObservation, OtherArthropodAttr, OtherArthropodData,
};
use crate::enums::MonitoringType;
use crate::shared::answer_map::AnswerMap;
use crate::shared::field_key::FieldKey;
use crate::shared::metadata::parse_number;

use super::session::SurveySession;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyPayload {
    pub test_id: String,
    pub caracterizacion_datos: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub censo_datos: Option<CensusData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fenologico_datos: Option<PhenologyData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artropodo_datos: Option<ArthropodData>,
    /// `YYYY-MM-DD`
    pub fecha: String,
    pub fingerprint: String,
}

/// Values supplied by the environment at submit time
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionMetadata {
    pub fecha: NaiveDate,
    pub fingerprint: String,
}

impl SubmissionMetadata {
    /// Today (UTC) with the given fingerprint
    pub fn now(fingerprint: String) -> Self {
        Self {
            fecha: Utc::now().date_naive(),
            fingerprint,
        }
    }
}

/// Number answer, `0.0` when absent or unparsable
fn number(answers: &AnswerMap, key: &str) -> f64 {
    parse_number(answers.value(key)).unwrap_or(0.0)
}

fn non_blank(answers: &AnswerMap, key: &str) -> Option<String> {
    answers.get(key).filter(|v| !v.trim().is_empty()).map(String::from)
}

/// Build the payload. Never fails: call after validation.
pub fn assemble(
    template: &FormTemplate,
    session: &SurveySession,
    metadata: &SubmissionMetadata,
) -> SurveyPayload {
    let answers = &session.answers;
    let lote = session.lot.clone().unwrap_or_default();

    let mut caracterizacion_datos = answers.top_level();
    if let Some(participant) = &session.participant_type {
        caracterizacion_datos.insert("tipo_participante".to_string(), participant.clone());
    }
    if let Some(lot) = &session.lot {
        caracterizacion_datos.insert("lote_a_monitorear".to_string(), lot.clone());
    }

    let kind = session.monitoring_type();

    let censo_datos = (kind == Some(MonitoringType::Poblacion)).then(|| CensusData {
        lote: lote.clone(),
        plantas: census_plants(session),
    });
    let fenologico_datos = (kind == Some(MonitoringType::Fenologico)).then(|| PhenologyData {
        lote: lote.clone(),
        plantas: phenology_plants(session),
    });
    let artropodo_datos = (kind == Some(MonitoringType::Artropodos)).then(|| {
        let other = other_arthropod(answers);
        ArthropodData {
            lote: lote.clone(),
            plantas: arthropod_plants(session),
            otro_artropodo: (!other.is_empty()).then_some(other),
        }
    });

    SurveyPayload {
        test_id: template.id.clone(),
        caracterizacion_datos,
        censo_datos,
        fenologico_datos,
        artropodo_datos,
        fecha: metadata.fecha.format("%Y-%m-%d").to_string(),
        fingerprint: metadata.fingerprint.clone(),
    }
}

fn census_plants(session: &SurveySession) -> Vec<CensusPlantData> {
    let answers = &session.answers;
    session
        .units
        .iter()
        .enumerate()
        .map(|(i, planta)| {
            let unit = i + 1;
            let key = |attr| FieldKey::Census { unit, attr }.key();
            CensusPlantData {
                codigo: planta.codigo.clone(),
                observacion: answers.value(&key(CensusAttr::Observacion)).to_string(),
                altura: number(answers, &key(CensusAttr::Altura)),
                diametro: number(answers, &key(CensusAttr::Diametro)),
            }
        })
        .collect()
}

fn phenology_plants(session: &SurveySession) -> Vec<PhenologyPlantData> {
    let answers = &session.answers;
    session
        .phenology_units
        .iter()
        .enumerate()
        .map(|(i, unit_state)| {
            let unit = i + 1;
            let mut data = PhenologyPlantData::new(unit_state.planta.codigo.clone(), unit_state.fase);
            for attr in unit_state.fase.attributes() {
                let key = FieldKey::Phenology { unit, attr: *attr }.key();
                if attr.is_count() {
                    data.set_count(*attr, number(answers, &key));
                } else {
                    data.set_bbch(*attr, answers.value(&key).trim().to_string());
                }
            }
            data
        })
        .collect()
}

fn arthropod_plants(session: &SurveySession) -> Vec<ArthropodPlantData> {
    let answers = &session.answers;
    session
        .units
        .iter()
        .enumerate()
        .map(|(i, planta)| {
            let unit = i + 1;
            let state = session.arthropod_unit(unit);

            let insecto = state
                .insect
                .filter(|_| state.has(ArthropodClass::Insecto))
                .map(|species| {
                    let read = |attr: ArthropodAttr| {
                        answers.get(&FieldKey::Insect { unit, species, attr }.key()).map(String::from)
                    };
                    InsectObservation::build(species, &read)
                });
            let acaro = state
                .mite
                .filter(|_| state.has(ArthropodClass::Aracnido))
                .map(|species| {
                    let read = |attr: ArthropodAttr| {
                        answers.get(&FieldKey::Mite { unit, species, attr }.key()).map(String::from)
                    };
                    MiteObservation::build(species, &read)
                });

            ArthropodPlantData {
                codigo: planta.codigo.clone(),
                clases: state.classes.clone(),
                insecto,
                acaro,
            }
        })
        .collect()
}

fn other_arthropod(answers: &AnswerMap) -> OtherArthropodData {
    let read = |attr| non_blank(answers, &FieldKey::OtherArthropod(attr).key());
    OtherArthropodData {
        sintomas: read(OtherArthropodAttr::Sintomas),
        clase: read(OtherArthropodAttr::Clase),
        nombre: read(OtherArthropodAttr::Nombre),
        fotos: read(OtherArthropodAttr::Fotos),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_questionnaire::CharacterizationTemplate;
    use crate::domain::a002_sampling_unit::{PhasePolicy, SAMPLE_SIZE};
    use crate::domain::a004_phenology::{Phase, PhenologyAttr};
    use crate::domain::a005_arthropod::InsectSpecies;
    use crate::usecases::u501_field_survey::session::Sampler;
    use crate::usecases::u501_field_survey::validation::validate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MONITORING_FIELD: &str = "¿Qué se va a monitorear?";

    fn template() -> FormTemplate {
        FormTemplate {
            id: "f1".into(),
            caracterizacion_template: CharacterizationTemplate {
                campos_requeridos: vec!["Nombre".into(), MONITORING_FIELD.into()],
                tipo_participante: "Técnico".into(),
            },
            censo: Default::default(),
            fenologico: Default::default(),
        }
    }

    fn metadata() -> SubmissionMetadata {
        SubmissionMetadata {
            fecha: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            fingerprint: "abc123".into(),
        }
    }

    fn session(kind: &str) -> SurveySession {
        let mut sampler = Sampler::new(StdRng::seed_from_u64(21), PhasePolicy::UserAssigned);
        let mut session = SurveySession::default();
        session.select_template(&template());
        session.set_answer("Nombre", "Ana");
        session.set_characterization(MONITORING_FIELD, kind, &mut sampler);
        session.select_lot("l3", &mut sampler);
        session
    }

    #[test]
    fn test_census_scenario() {
        let mut s = session("poblacion");
        for unit in 1..=SAMPLE_SIZE {
            s.set_answer(&format!("censo_planta_{}_observacion", unit), "Buena");
            s.set_answer(&format!("censo_planta_{}_altura", unit), "1.50");
            s.set_answer(&format!("censo_planta_{}_diametro", unit), "2.0");
        }
        assert_eq!(validate(&s, &[template()]), Ok(()));

        let payload = assemble(&template(), &s, &metadata());
        let censo = payload.censo_datos.as_ref().unwrap();
        assert_eq!(censo.lote, "l3");
        assert_eq!(censo.plantas.len(), SAMPLE_SIZE);
        for (plant, unit) in censo.plantas.iter().zip(&s.units) {
            assert_eq!(plant.codigo, unit.codigo);
            assert_eq!(plant.observacion, "Buena");
            assert_eq!(plant.altura, 1.5);
            assert_eq!(plant.diametro, 2.0);
        }
        assert!(payload.fenologico_datos.is_none());
        assert!(payload.artropodo_datos.is_none());
    }

    #[test]
    fn test_characterization_block() {
        let s = session("poblacion");
        let payload = assemble(&template(), &s, &metadata());
        let datos = &payload.caracterizacion_datos;

        assert_eq!(payload.test_id, "f1");
        assert_eq!(payload.fecha, "2024-03-09");
        assert_eq!(payload.fingerprint, "abc123");
        assert_eq!(datos.get("Nombre").map(String::as_str), Some("Ana"));
        assert_eq!(datos.get(MONITORING_FIELD).map(String::as_str), Some("poblacion"));
        assert_eq!(datos.get("tipo_participante").map(String::as_str), Some("Técnico"));
        assert_eq!(datos.get("lote_a_monitorear").map(String::as_str), Some("l3"));
        assert!(datos.keys().all(|k| !k.starts_with("censo_")));
    }

    #[test]
    fn test_phenology_payload_keeps_active_phase_only() {
        let mut s = session("fenologico");
        s.set_phase(1, Phase::Floracion);
        s.set_answer(&FieldKey::Phenology { unit: 1, attr: PhenologyAttr::TotalFlores }.key(), "30");
        s.set_answer(&FieldKey::Phenology { unit: 1, attr: PhenologyAttr::BotonesFlorales }.key(), "12");
        s.set_answer(&FieldKey::Phenology { unit: 1, attr: PhenologyAttr::BbchFloracion }.key(), "65");
        s.set_answer(&FieldKey::Phenology { unit: 1, attr: PhenologyAttr::TotalHojas }.key(), "45");

        let payload = assemble(&template(), &s, &metadata());
        let json = serde_json::to_value(&payload).unwrap();
        let first = &json["fenologico_datos"]["plantas"][0];

        assert_eq!(first["fase"], "floracion");
        assert_eq!(first["totalFlores"], 30.0);
        assert_eq!(first["botonesFlorales"], 12.0);
        assert_eq!(first["bbchFloracion"], "65");
        assert!(first.get("totalHojas").is_none());
        assert_eq!(json["fenologico_datos"]["plantas"][1]["fase"], "");
        assert!(json.get("censo_datos").is_none());
    }

    #[test]
    fn test_arthropod_payload() {
        let mut s = session("artropodos");
        s.toggle_class(2, ArthropodClass::Insecto, true);
        s.select_insect(2, Some(InsectSpecies::Compsus));
        s.set_answer("artropodo_planta_2_insecto_compsus_adultos", "3");
        s.set_answer("artropodo_planta_2_insecto_compsus_dano_hojas", "medio");
        s.set_answer("artropodo_otro_sintomas", "Hojas enrolladas");

        let payload = assemble(&template(), &s, &metadata());
        let datos = payload.artropodo_datos.unwrap();
        assert_eq!(datos.plantas.len(), SAMPLE_SIZE);
        assert!(datos.plantas[0].clases.is_empty());
        assert!(datos.plantas[0].insecto.is_none());
        assert_eq!(datos.plantas[1].clases, vec![ArthropodClass::Insecto]);
        assert_eq!(
            datos.plantas[1].insecto,
            Some(InsectObservation::Compsus {
                adultos: 3.0,
                dano_hojas: "medio".into(),
                fotos: None,
            })
        );
        let other = datos.otro_artropodo.unwrap();
        assert_eq!(other.sintomas.as_deref(), Some("Hojas enrolladas"));
        assert!(other.clase.is_none());
    }

    #[test]
    fn test_ant_payload_includes_mound_location() {
        let mut s = session("artropodos");
        s.toggle_class(3, ArthropodClass::Insecto, true);
        s.select_insect(3, Some(InsectSpecies::Hormiga));
        s.set_answer("artropodo_planta_3_insecto_hormiga_activos", "si");
        s.set_answer("artropodo_planta_3_insecto_hormiga_numero", "2");
        s.set_answer("artropodo_planta_3_insecto_hormiga_ubicacion", "3 - 6 - 1 Hormiguero");

        let payload = assemble(&template(), &s, &metadata());
        let datos = payload.artropodo_datos.unwrap();
        assert_eq!(
            datos.plantas[2].insecto,
            Some(InsectObservation::Hormiga {
                activos: "si".into(),
                numero: 2.0,
                ubicacion: "3 - 6 - 1 Hormiguero".into(),
                fotos: None,
            })
        );
    }

    #[test]
    fn test_other_arthropod_omitted_when_blank() {
        let s = session("artropodos");
        let payload = assemble(&template(), &s, &metadata());
        assert!(payload.artropodo_datos.unwrap().otro_artropodo.is_none());
    }
}
