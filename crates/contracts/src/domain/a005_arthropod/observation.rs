//! Submission DTOs of the arthropod branch

use serde::{Deserialize, Serialize};

use super::aggregate::{ArthropodAttr, ArthropodClass, InsectSpecies, MiteSpecies};
use crate::shared::metadata::parse_number;

/// Reads one attribute of the observed species; `None` when unanswered
pub type AttrReader<'a> = dyn Fn(ArthropodAttr) -> Option<String> + 'a;

fn count(read: &AttrReader<'_>, attr: ArthropodAttr) -> f64 {
    read(attr).as_deref().and_then(parse_number).unwrap_or(0.0)
}

fn text(read: &AttrReader<'_>, attr: ArthropodAttr) -> String {
    read(attr).unwrap_or_default()
}

fn photos(read: &AttrReader<'_>) -> Option<String> {
    read(ArthropodAttr::Fotos).filter(|v| !v.trim().is_empty())
}

/// Insect observation tagged by species code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum InsectObservation {
    Compsus {
        adultos: f64,
        dano_hojas: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fotos: Option<String>,
    },
    Diaphorina {
        brotes: f64,
        estados: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fotos: Option<String>,
    },
    Phyllocnistis {
        galerias: f64,
        nivel_dano: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fotos: Option<String>,
    },
    Toxoptera {
        brotes: f64,
        mielecilla: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fotos: Option<String>,
    },
    Hormiga {
        activos: String,
        numero: f64,
        ubicacion: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fotos: Option<String>,
    },
    #[serde(rename = "otro_insecto")]
    Otro { nombre: String },
}

impl InsectObservation {
    pub fn build(species: InsectSpecies, read: &AttrReader<'_>) -> Self {
        match species {
            InsectSpecies::Compsus => Self::Compsus {
                adultos: count(read, ArthropodAttr::Adultos),
                dano_hojas: text(read, ArthropodAttr::DanoHojas),
                fotos: photos(read),
            },
            InsectSpecies::Diaphorina => Self::Diaphorina {
                brotes: count(read, ArthropodAttr::BrotesConPresencia),
                estados: text(read, ArthropodAttr::Estados)
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
                fotos: photos(read),
            },
            InsectSpecies::Phyllocnistis => Self::Phyllocnistis {
                galerias: count(read, ArthropodAttr::Galerias),
                nivel_dano: text(read, ArthropodAttr::NivelDano),
                fotos: photos(read),
            },
            InsectSpecies::Toxoptera => Self::Toxoptera {
                brotes: count(read, ArthropodAttr::BrotesInfestados),
                mielecilla: text(read, ArthropodAttr::Mielecilla),
                fotos: photos(read),
            },
            InsectSpecies::Hormiga => Self::Hormiga {
                activos: text(read, ArthropodAttr::HormiguerosActivos),
                numero: count(read, ArthropodAttr::Hormigueros),
                ubicacion: text(read, ArthropodAttr::UbicacionHormigueros).trim().to_string(),
                fotos: photos(read),
            },
            InsectSpecies::Otro => Self::Otro {
                nombre: text(read, ArthropodAttr::NombreInsecto).trim().to_string(),
            },
        }
    }
}

/// Mite observation tagged by species code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum MiteObservation {
    Phyllocoptruta {
        frutos: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fotos: Option<String>,
    },
    Polyphagotarsonemus {
        frutos: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fotos: Option<String>,
    },
    #[serde(rename = "otro_acaro")]
    Otro { nombre: String },
}

impl MiteObservation {
    pub fn build(species: MiteSpecies, read: &AttrReader<'_>) -> Self {
        match species {
            MiteSpecies::Phyllocoptruta => Self::Phyllocoptruta {
                frutos: count(read, ArthropodAttr::HojasFrutosAfectados),
                fotos: photos(read),
            },
            MiteSpecies::Polyphagotarsonemus => Self::Polyphagotarsonemus {
                frutos: count(read, ArthropodAttr::FrutosAfectados),
                fotos: photos(read),
            },
            MiteSpecies::Otro => Self::Otro {
                nombre: text(read, ArthropodAttr::NombreAcaro).trim().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArthropodPlantData {
    pub codigo: String,
    pub clases: Vec<ArthropodClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecto: Option<InsectObservation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acaro: Option<MiteObservation>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OtherArthropodData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sintomas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fotos: Option<String>,
}

impl OtherArthropodData {
    pub fn is_empty(&self) -> bool {
        self.sintomas.is_none() && self.clase.is_none() && self.nombre.is_none() && self.fotos.is_none()
    }
}

/// `artropodo_datos` block of the submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArthropodData {
    pub lote: String,
    pub plantas: Vec<ArthropodPlantData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otro_artropodo: Option<OtherArthropodData>,
}
