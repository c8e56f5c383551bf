use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::field_key::{ARTHROPOD_PREFIX, CENSUS_PREFIX, PHENOLOGY_PREFIX};
use crate::shared::metadata::Choice;

/// What is monitored in this session (top-level branch of the form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringType {
    Poblacion,
    Fenologico,
    Artropodos,
    Enfermedades,
    Arvenses,
    Biologicos,
    Polinizadores,
}

pub const MONITORING_CHOICES: &[Choice] = &[
    ("poblacion", "Censo Poblacional"),
    ("fenologico", "Monitoreo Fenológico"),
    ("artropodos", "Artrópodos"),
    ("enfermedades", "Enfermedades"),
    ("arvenses", "Arvenses"),
    ("biologicos", "Controladores Biológicos"),
    ("polinizadores", "Polinizadores"),
];

impl MonitoringType {
    /// Value stored in the answer map
    pub fn code(&self) -> &'static str {
        match self {
            MonitoringType::Poblacion => "poblacion",
            MonitoringType::Fenologico => "fenologico",
            MonitoringType::Artropodos => "artropodos",
            MonitoringType::Enfermedades => "enfermedades",
            MonitoringType::Arvenses => "arvenses",
            MonitoringType::Biologicos => "biologicos",
            MonitoringType::Polinizadores => "polinizadores",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MonitoringType::Poblacion => "Censo Poblacional",
            MonitoringType::Fenologico => "Monitoreo Fenológico",
            MonitoringType::Artropodos => "Artrópodos",
            MonitoringType::Enfermedades => "Enfermedades",
            MonitoringType::Arvenses => "Arvenses",
            MonitoringType::Biologicos => "Controladores Biológicos",
            MonitoringType::Polinizadores => "Polinizadores",
        }
    }

    pub fn all() -> &'static [MonitoringType] {
        &[
            MonitoringType::Poblacion,
            MonitoringType::Fenologico,
            MonitoringType::Artropodos,
            MonitoringType::Enfermedades,
            MonitoringType::Arvenses,
            MonitoringType::Biologicos,
            MonitoringType::Polinizadores,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.code() == code.trim())
    }

    /// Types that are monitored plant by plant over the 5 sampled units
    pub fn requires_sampling_units(&self) -> bool {
        self.field_prefix().is_some()
    }

    /// Prefix owning every answer key of this type's sub-form
    pub fn field_prefix(&self) -> Option<&'static str> {
        match self {
            MonitoringType::Poblacion => Some(CENSUS_PREFIX),
            MonitoringType::Fenologico => Some(PHENOLOGY_PREFIX),
            MonitoringType::Artropodos => Some(ARTHROPOD_PREFIX),
            MonitoringType::Enfermedades
            | MonitoringType::Arvenses
            | MonitoringType::Biologicos
            | MonitoringType::Polinizadores => None,
        }
    }
}

impl fmt::Display for MonitoringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
