use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::metadata::{Choice, FieldAttribute, FieldKind, ValidationRules};

// ============================================================================
// Phase
// ============================================================================

/// Phenological phase of a sampled plant; `Unset` serializes as `""`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "vegetativa")]
    Vegetativa,
    #[serde(rename = "floracion")]
    Floracion,
    #[serde(rename = "fructificacion")]
    Fructificacion,
    #[default]
    #[serde(rename = "")]
    Unset,
}

pub const PHASE_CHOICES: &[Choice] = &[
    ("vegetativa", "Vegetativa"),
    ("floracion", "Floración"),
    ("fructificacion", "Fructificación"),
];

pub const BBCH_VEGETATIVE: &[Choice] = &[
    ("10-11", "10–11: Primeras hojas visibles"),
    ("15", "15: Hojas en expansión"),
    ("19", "19: Hojas alcanzan tamaño final"),
];

pub const BBCH_FLOWERING: &[Choice] = &[
    ("60", "60: primeras flores abiertas"),
    ("65", "65: Plena floración (≈50% abiertas)"),
    ("67", "67: Inicio caída de pétalos"),
    ("69", "69: Fin de floración"),
];

pub const BBCH_FRUITING: &[Choice] = &[
    ("71", "71: Cuajado inicial"),
    ("72", "72: Fruto verde con sépalos"),
    ("74", "74: Crecimiento del fruto"),
    ("79", "79: ≈90% Tamaño final"),
];

impl Phase {
    pub fn code(&self) -> &'static str {
        match self {
            Phase::Vegetativa => "vegetativa",
            Phase::Floracion => "floracion",
            Phase::Fructificacion => "fructificacion",
            Phase::Unset => "",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "vegetativa" => Phase::Vegetativa,
            "floracion" => Phase::Floracion,
            "fructificacion" => Phase::Fructificacion,
            _ => Phase::Unset,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Vegetativa => "Vegetativa",
            Phase::Floracion => "Floración",
            Phase::Fructificacion => "Fructificación",
            Phase::Unset => "Sin fase",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Phase::Unset)
    }

    /// Uniformly random assigned phase
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => Phase::Vegetativa,
            1 => Phase::Floracion,
            _ => Phase::Fructificacion,
        }
    }

    /// Fields recorded while a plant is in this phase
    pub fn attributes(&self) -> &'static [PhenologyAttr] {
        match self {
            Phase::Vegetativa => &[
                PhenologyAttr::TotalHojas,
                PhenologyAttr::BrotesActivos,
                PhenologyAttr::BbchVegetativo,
            ],
            Phase::Floracion => &[
                PhenologyAttr::TotalFlores,
                PhenologyAttr::BotonesFlorales,
                PhenologyAttr::BbchFloracion,
            ],
            Phase::Fructificacion => &[
                PhenologyAttr::TotalFrutos,
                PhenologyAttr::FrutosCanica,
                PhenologyAttr::FrutosPinpon,
                PhenologyAttr::FrutosBolaTenis,
                PhenologyAttr::FrutosCuarto,
                PhenologyAttr::BbchFructificacion,
            ],
            Phase::Unset => &[],
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Attributes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhenologyAttr {
    TotalHojas,
    BrotesActivos,
    BbchVegetativo,
    TotalFlores,
    BotonesFlorales,
    BbchFloracion,
    TotalFrutos,
    FrutosCanica,
    FrutosPinpon,
    FrutosBolaTenis,
    FrutosCuarto,
    BbchFructificacion,
}

impl PhenologyAttr {
    pub fn all() -> &'static [PhenologyAttr] {
        &[
            PhenologyAttr::TotalHojas,
            PhenologyAttr::BrotesActivos,
            PhenologyAttr::BbchVegetativo,
            PhenologyAttr::TotalFlores,
            PhenologyAttr::BotonesFlorales,
            PhenologyAttr::BbchFloracion,
            PhenologyAttr::TotalFrutos,
            PhenologyAttr::FrutosCanica,
            PhenologyAttr::FrutosPinpon,
            PhenologyAttr::FrutosBolaTenis,
            PhenologyAttr::FrutosCuarto,
            PhenologyAttr::BbchFructificacion,
        ]
    }

    /// BBCH code list for the BBCH attributes, `None` for counts
    pub fn bbch_codes(&self) -> Option<&'static [Choice]> {
        match self {
            PhenologyAttr::BbchVegetativo => Some(BBCH_VEGETATIVE),
            PhenologyAttr::BbchFloracion => Some(BBCH_FLOWERING),
            PhenologyAttr::BbchFructificacion => Some(BBCH_FRUITING),
            _ => None,
        }
    }

    pub fn is_count(&self) -> bool {
        self.bbch_codes().is_none()
    }
}

impl FieldAttribute for PhenologyAttr {
    fn key_segment(&self) -> &'static str {
        match self {
            PhenologyAttr::TotalHojas => "total_hojas",
            PhenologyAttr::BrotesActivos => "brotes_activos",
            PhenologyAttr::BbchVegetativo => "bbch_vegetativo",
            PhenologyAttr::TotalFlores => "total_flores",
            PhenologyAttr::BotonesFlorales => "botones_florales",
            PhenologyAttr::BbchFloracion => "bbch_floracion",
            PhenologyAttr::TotalFrutos => "total_frutos",
            PhenologyAttr::FrutosCanica => "frutos_canica",
            PhenologyAttr::FrutosPinpon => "frutos_pinpon",
            PhenologyAttr::FrutosBolaTenis => "frutos_bola_tenis",
            PhenologyAttr::FrutosCuarto => "frutos_cuarto",
            PhenologyAttr::BbchFructificacion => "bbch_fructificacion",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PhenologyAttr::TotalHojas => "Número total de hojas evaluadas",
            PhenologyAttr::BrotesActivos => "Número de brotes vegetativos activos",
            PhenologyAttr::TotalFlores => "Número total de flores observadas",
            PhenologyAttr::BotonesFlorales => "Número de botones florales",
            PhenologyAttr::TotalFrutos => "Número total de frutos observados",
            PhenologyAttr::FrutosCanica => "Frutos tipo canica",
            PhenologyAttr::FrutosPinpon => "Frutos tipo pin-pon",
            PhenologyAttr::FrutosBolaTenis => "Frutos tipo bola de tenis",
            PhenologyAttr::FrutosCuarto => "Frutos 1/4 de maduración",
            PhenologyAttr::BbchVegetativo
            | PhenologyAttr::BbchFloracion
            | PhenologyAttr::BbchFructificacion => "Estado BBCH predominante",
        }
    }

    fn kind(&self) -> FieldKind {
        match self.bbch_codes() {
            Some(codes) => FieldKind::Select(codes),
            None => FieldKind::Number { min: 0.0, step: "1" },
        }
    }

    fn rules(&self) -> ValidationRules {
        if self.is_count() {
            ValidationRules::non_negative()
        } else {
            ValidationRules::required()
        }
    }

    fn placeholder(&self) -> Option<&'static str> {
        match self {
            PhenologyAttr::TotalHojas => Some("Ej: 45"),
            PhenologyAttr::BrotesActivos => Some("Ej: 8"),
            PhenologyAttr::TotalFlores => Some("Ej: 30"),
            PhenologyAttr::BotonesFlorales => Some("Ej: 12"),
            PhenologyAttr::TotalFrutos => Some("Ej: 50"),
            PhenologyAttr::FrutosCanica => Some("Ej: 10"),
            PhenologyAttr::FrutosPinpon => Some("Ej: 15"),
            PhenologyAttr::FrutosBolaTenis => Some("Ej: 12"),
            PhenologyAttr::FrutosCuarto => Some("Ej: 8"),
            _ => None,
        }
    }
}

// ============================================================================
// Submission DTOs
// ============================================================================

/// One phenology plant as sent to the backend; only the active phase's fields are present
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhenologyPlantData {
    pub codigo: String,
    pub fase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_hojas: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brotes_activos: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbch_vegetativo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_flores: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub botones_florales: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbch_floracion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_frutos: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frutos_canica: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frutos_pinpon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frutos_bola_tenis: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frutos_cuarto_maduracion: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbch_fructificacion: Option<String>,
}

impl PhenologyPlantData {
    pub fn new(codigo: String, fase: Phase) -> Self {
        Self {
            codigo,
            fase,
            ..Self::default()
        }
    }

    /// Store a count attribute
    pub fn set_count(&mut self, attr: PhenologyAttr, value: f64) {
        let slot = match attr {
            PhenologyAttr::TotalHojas => &mut self.total_hojas,
            PhenologyAttr::BrotesActivos => &mut self.brotes_activos,
            PhenologyAttr::TotalFlores => &mut self.total_flores,
            PhenologyAttr::BotonesFlorales => &mut self.botones_florales,
            PhenologyAttr::TotalFrutos => &mut self.total_frutos,
            PhenologyAttr::FrutosCanica => &mut self.frutos_canica,
            PhenologyAttr::FrutosPinpon => &mut self.frutos_pinpon,
            PhenologyAttr::FrutosBolaTenis => &mut self.frutos_bola_tenis,
            PhenologyAttr::FrutosCuarto => &mut self.frutos_cuarto_maduracion,
            PhenologyAttr::BbchVegetativo
            | PhenologyAttr::BbchFloracion
            | PhenologyAttr::BbchFructificacion => return,
        };
        *slot = Some(value);
    }

    /// Store a BBCH code attribute
    pub fn set_bbch(&mut self, attr: PhenologyAttr, code: String) {
        match attr {
            PhenologyAttr::BbchVegetativo => self.bbch_vegetativo = Some(code),
            PhenologyAttr::BbchFloracion => self.bbch_floracion = Some(code),
            PhenologyAttr::BbchFructificacion => self.bbch_fructificacion = Some(code),
            _ => {}
        }
    }
}

/// `fenologico_datos` block of the submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenologyData {
    pub lote: String,
    pub plantas: Vec<PhenologyPlantData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_phase_serializes_as_empty_string() {
        assert_eq!(serde_json::to_string(&Phase::Unset).unwrap(), "\"\"");
        let phase: Phase = serde_json::from_str("\"floracion\"").unwrap();
        assert_eq!(phase, Phase::Floracion);
    }

    #[test]
    fn test_each_phase_has_one_bbch_field() {
        for phase in [Phase::Vegetativa, Phase::Floracion, Phase::Fructificacion] {
            let bbch = phase
                .attributes()
                .iter()
                .filter(|a| a.bbch_codes().is_some())
                .count();
            assert_eq!(bbch, 1, "phase {:?}", phase);
        }
        assert!(Phase::Unset.attributes().is_empty());
    }

    #[test]
    fn test_plant_data_uses_camel_case_and_skips_other_phases() {
        let mut data = PhenologyPlantData::new("3-7".into(), Phase::Floracion);
        data.set_count(PhenologyAttr::TotalFlores, 30.0);
        data.set_count(PhenologyAttr::BotonesFlorales, 12.0);
        data.set_bbch(PhenologyAttr::BbchFloracion, "65".into());

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["fase"], "floracion");
        assert_eq!(json["totalFlores"], 30.0);
        assert_eq!(json["botonesFlorales"], 12.0);
        assert_eq!(json["bbchFloracion"], "65");
        assert!(json.get("totalHojas").is_none());
    }
}
