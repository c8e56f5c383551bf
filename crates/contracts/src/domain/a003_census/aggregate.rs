use serde::{Deserialize, Serialize};

use crate::shared::metadata::{Choice, FieldAttribute, FieldKind, ValidationRules};

// ============================================================================
// Attributes
// ============================================================================

pub const OBSERVATION_CHOICES: &[Choice] = &[
    ("Buena", "Buena"),
    ("Regular", "Regular"),
    ("Mala", "Mala"),
    ("Resiembra", "Resiembra"),
    ("Punto Vacío", "Punto Vacío"),
];

/// Per-plant census measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CensusAttr {
    Observacion,
    Altura,
    Diametro,
}

impl CensusAttr {
    pub fn all() -> &'static [CensusAttr] {
        &[CensusAttr::Observacion, CensusAttr::Altura, CensusAttr::Diametro]
    }
}

impl FieldAttribute for CensusAttr {
    fn key_segment(&self) -> &'static str {
        match self {
            CensusAttr::Observacion => "observacion",
            CensusAttr::Altura => "altura",
            CensusAttr::Diametro => "diametro",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CensusAttr::Observacion => "Observaciones de la planta",
            CensusAttr::Altura => "Altura de la planta (m)",
            CensusAttr::Diametro => "Diámetro de la copa (m)",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            CensusAttr::Observacion => FieldKind::Select(OBSERVATION_CHOICES),
            CensusAttr::Altura | CensusAttr::Diametro => FieldKind::Number { min: 0.0, step: "0.01" },
        }
    }

    fn rules(&self) -> ValidationRules {
        match self {
            CensusAttr::Observacion => ValidationRules::required(),
            CensusAttr::Altura | CensusAttr::Diametro => ValidationRules::positive(),
        }
    }

    fn placeholder(&self) -> Option<&'static str> {
        match self {
            CensusAttr::Observacion => None,
            CensusAttr::Altura => Some("Ej: 1.50"),
            CensusAttr::Diametro => Some("Ej: 2.00"),
        }
    }
}

// ============================================================================
// Submission DTOs
// ============================================================================

/// One censused plant as sent to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusPlantData {
    pub codigo: String,
    pub observacion: String,
    pub altura: f64,
    pub diametro: f64,
}

/// `censo_datos` block of the submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusData {
    pub lote: String,
    pub plantas: Vec<CensusPlantData>,
}
