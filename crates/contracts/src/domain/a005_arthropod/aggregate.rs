use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::metadata::{Choice, FieldAttribute, FieldKind, ValidationRules};

// ============================================================================
// Classes
// ============================================================================

/// Arthropod class observed on a sampled plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArthropodClass {
    Insecto,
    Aracnido,
}

pub const CLASS_CHOICES: &[Choice] = &[("insecto", "Insecto"), ("aracnido", "Arácnido")];

impl ArthropodClass {
    pub fn code(&self) -> &'static str {
        match self {
            ArthropodClass::Insecto => "insecto",
            ArthropodClass::Aracnido => "aracnido",
        }
    }

    /// Segment used in answer keys; mites live under `acaro`
    pub fn key_segment(&self) -> &'static str {
        match self {
            ArthropodClass::Insecto => "insecto",
            ArthropodClass::Aracnido => "acaro",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ArthropodClass::Insecto => "Insecto",
            ArthropodClass::Aracnido => "Arácnido",
        }
    }

    pub fn all() -> &'static [ArthropodClass] {
        &[ArthropodClass::Insecto, ArthropodClass::Aracnido]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.code() == code.trim())
    }

    /// Parse the comma-joined checklist answer, ignoring unknown codes
    pub fn parse_list(raw: &str) -> Vec<ArthropodClass> {
        let mut classes: Vec<ArthropodClass> = raw.split(',').filter_map(Self::from_code).collect();
        classes.sort();
        classes.dedup();
        classes
    }
}

impl fmt::Display for ArthropodClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Species
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsectSpecies {
    Compsus,
    Diaphorina,
    Phyllocnistis,
    Toxoptera,
    Hormiga,
    Otro,
}

pub const INSECT_CHOICES: &[Choice] = &[
    ("compsus", "Compsus sp. - Picudo"),
    ("diaphorina", "Diaphorina citri - Psílido asiático"),
    ("phyllocnistis", "Phyllocnistis sp. - Minador de la hoja"),
    ("toxoptera", "Toxoptera citricidus - Pulgón negro"),
    ("hormiga", "Hormiga arriera"),
    ("otro_insecto", "Otro"),
];

impl InsectSpecies {
    pub fn all() -> &'static [InsectSpecies] {
        &[
            InsectSpecies::Compsus,
            InsectSpecies::Diaphorina,
            InsectSpecies::Phyllocnistis,
            InsectSpecies::Toxoptera,
            InsectSpecies::Hormiga,
            InsectSpecies::Otro,
        ]
    }

    /// Value stored in the species select
    pub fn code(&self) -> &'static str {
        match self {
            InsectSpecies::Compsus => "compsus",
            InsectSpecies::Diaphorina => "diaphorina",
            InsectSpecies::Phyllocnistis => "phyllocnistis",
            InsectSpecies::Toxoptera => "toxoptera",
            InsectSpecies::Hormiga => "hormiga",
            InsectSpecies::Otro => "otro_insecto",
        }
    }

    pub fn key_segment(&self) -> &'static str {
        match self {
            InsectSpecies::Otro => "otro",
            other => other.code(),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.code() == code.trim())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InsectSpecies::Compsus => "Compsus sp.",
            InsectSpecies::Diaphorina => "Diaphorina citri",
            InsectSpecies::Phyllocnistis => "Phyllocnistis sp.",
            InsectSpecies::Toxoptera => "Toxoptera citricidus",
            InsectSpecies::Hormiga => "Hormiga arriera",
            InsectSpecies::Otro => "Otro insecto",
        }
    }

    /// Field instructions shown above the species block
    pub fn instructions(&self) -> Option<&'static str> {
        match self {
            InsectSpecies::Compsus => Some(
                "Sacuda de forma suave las ramas de arriba hacia abajo y registre los adultos observados en el suelo.",
            ),
            InsectSpecies::Diaphorina => Some(
                "Revise 4 brotes por punto cardinal (16 brotes por árbol) buscando huevos, ninfas y adultos.",
            ),
            InsectSpecies::Phyllocnistis => {
                Some("Revise brotes tiernos buscando galerías serpenteantes en las hojas.")
            }
            InsectSpecies::Toxoptera => {
                Some("Revise los brotes nuevos buscando colonias de pulgón negro.")
            }
            InsectSpecies::Hormiga => Some(
                "- Identificar: *Bocas activas de hormiguero. *Caminos o \u{201c}carreteras\u{201d} de corte.\n\
                 - Evaluar grado de defoliación reciente:\n\
                 Nivel 0: Sin daño, 1: <10%, 2: 10–25%, 3: 25–50%, 4: >50%",
            ),
            InsectSpecies::Otro => None,
        }
    }

    pub fn attributes(&self) -> &'static [ArthropodAttr] {
        match self {
            InsectSpecies::Compsus => &[
                ArthropodAttr::Adultos,
                ArthropodAttr::DanoHojas,
                ArthropodAttr::Fotos,
            ],
            InsectSpecies::Diaphorina => &[
                ArthropodAttr::BrotesConPresencia,
                ArthropodAttr::Estados,
                ArthropodAttr::Fotos,
            ],
            InsectSpecies::Phyllocnistis => &[
                ArthropodAttr::Galerias,
                ArthropodAttr::NivelDano,
                ArthropodAttr::Fotos,
            ],
            InsectSpecies::Toxoptera => &[
                ArthropodAttr::BrotesInfestados,
                ArthropodAttr::Mielecilla,
                ArthropodAttr::Fotos,
            ],
            InsectSpecies::Hormiga => &[
                ArthropodAttr::HormiguerosActivos,
                ArthropodAttr::Hormigueros,
                ArthropodAttr::UbicacionHormigueros,
                ArthropodAttr::Fotos,
            ],
            InsectSpecies::Otro => &[ArthropodAttr::NombreInsecto],
        }
    }
}

impl fmt::Display for InsectSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MiteSpecies {
    Phyllocoptruta,
    Polyphagotarsonemus,
    Otro,
}

pub const MITE_CHOICES: &[Choice] = &[
    ("phyllocoptruta", "Phyllocoptruta sp. - Ácaro blanco"),
    ("polyphagotarsonemus", "Polyphagotarsonemus sp. - Ácaro tostador"),
    ("otro_acaro", "Otro"),
];

impl MiteSpecies {
    pub fn all() -> &'static [MiteSpecies] {
        &[
            MiteSpecies::Phyllocoptruta,
            MiteSpecies::Polyphagotarsonemus,
            MiteSpecies::Otro,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            MiteSpecies::Phyllocoptruta => "phyllocoptruta",
            MiteSpecies::Polyphagotarsonemus => "polyphagotarsonemus",
            MiteSpecies::Otro => "otro_acaro",
        }
    }

    pub fn key_segment(&self) -> &'static str {
        match self {
            MiteSpecies::Otro => "otro",
            other => other.code(),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.code() == code.trim())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MiteSpecies::Phyllocoptruta => "Phyllocoptruta sp.",
            MiteSpecies::Polyphagotarsonemus => "Polyphagotarsonemus sp.",
            MiteSpecies::Otro => "Otro ácaro",
        }
    }

    pub fn instructions(&self) -> Option<&'static str> {
        match self {
            MiteSpecies::Phyllocoptruta => {
                Some("Revise hojas y frutos buscando el bronceado característico del ácaro blanco.")
            }
            MiteSpecies::Polyphagotarsonemus => {
                Some("Revise frutos jóvenes buscando manchas plateadas o tostadas.")
            }
            MiteSpecies::Otro => None,
        }
    }

    pub fn attributes(&self) -> &'static [ArthropodAttr] {
        match self {
            MiteSpecies::Phyllocoptruta => &[ArthropodAttr::HojasFrutosAfectados, ArthropodAttr::Fotos],
            MiteSpecies::Polyphagotarsonemus => &[ArthropodAttr::FrutosAfectados, ArthropodAttr::Fotos],
            MiteSpecies::Otro => &[ArthropodAttr::NombreAcaro],
        }
    }
}

impl fmt::Display for MiteSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Per-species attributes
// ============================================================================

const DAMAGE_CHOICES: &[Choice] = &[
    ("leve", "Leve"),
    ("medio", "Medio"),
    ("alto", "Alto"),
    ("no_dano", "No se encontró daño"),
];

const DAMAGE_LEVEL_CHOICES: &[Choice] = &[
    ("bajo", "Bajo"),
    ("medio", "Medio"),
    ("alto", "Alto"),
    ("sin_dano", "Sin daño observado"),
];

const YES_NO_CHOICES: &[Choice] = &[("si", "Sí"), ("no", "No")];

pub const LIFE_STAGE_CHOICES: &[Choice] = &[
    ("Huevo", "Huevo"),
    ("Ninfa", "Ninfa"),
    ("Adulto", "Adulto"),
    ("No se observaron", "No se observaron"),
];

/// Attribute of a species observation.
///
/// Variants sharing a key segment (`brotes`, `frutos`, `nombre`) never meet
/// under the same species prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArthropodAttr {
    Adultos,
    DanoHojas,
    BrotesConPresencia,
    Estados,
    Galerias,
    NivelDano,
    BrotesInfestados,
    Mielecilla,
    HormiguerosActivos,
    Hormigueros,
    UbicacionHormigueros,
    HojasFrutosAfectados,
    FrutosAfectados,
    NombreInsecto,
    NombreAcaro,
    Fotos,
}

impl ArthropodAttr {
    pub fn is_count(&self) -> bool {
        matches!(self.kind(), FieldKind::Number { .. })
    }
}

impl FieldAttribute for ArthropodAttr {
    fn key_segment(&self) -> &'static str {
        match self {
            ArthropodAttr::Adultos => "adultos",
            ArthropodAttr::DanoHojas => "dano_hojas",
            ArthropodAttr::BrotesConPresencia | ArthropodAttr::BrotesInfestados => "brotes",
            ArthropodAttr::Estados => "estados",
            ArthropodAttr::Galerias => "galerias",
            ArthropodAttr::NivelDano => "nivel_dano",
            ArthropodAttr::Mielecilla => "mielecilla",
            ArthropodAttr::HormiguerosActivos => "activos",
            ArthropodAttr::Hormigueros => "numero",
            ArthropodAttr::UbicacionHormigueros => "ubicacion",
            ArthropodAttr::HojasFrutosAfectados | ArthropodAttr::FrutosAfectados => "frutos",
            ArthropodAttr::NombreInsecto | ArthropodAttr::NombreAcaro => "nombre",
            ArthropodAttr::Fotos => "fotos",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ArthropodAttr::Adultos => "Adultos de Compsus sp. encontrados",
            ArthropodAttr::DanoHojas => "Daño en hojas",
            ArthropodAttr::BrotesConPresencia => "Brotes con presencia de Diaphorina citri",
            ArthropodAttr::Estados => "Estados del insecto observados",
            ArthropodAttr::Galerias => "Galerías hechas por Phyllocnistis sp.",
            ArthropodAttr::NivelDano => "Nivel de daño",
            ArthropodAttr::BrotesInfestados => "Brotes infestados de Toxoptera citricidus",
            ArthropodAttr::Mielecilla => "Se observó presencia de mielecilla y fumagina",
            ArthropodAttr::HormiguerosActivos => "¿Hay hormigueros activos?",
            ArthropodAttr::Hormigueros => "Número de hormigueros encontrados",
            ArthropodAttr::UbicacionHormigueros => "Ubicación de los hormigueros encontrados",
            ArthropodAttr::HojasFrutosAfectados => "Número de hojas y frutos afectados",
            ArthropodAttr::FrutosAfectados => "Número de frutos afectados",
            ArthropodAttr::NombreInsecto => "Nombre del insecto",
            ArthropodAttr::NombreAcaro => "Nombre del ácaro",
            ArthropodAttr::Fotos => "Fotos tomadas en campo de síntomas o del insecto",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            ArthropodAttr::Adultos
            | ArthropodAttr::BrotesConPresencia
            | ArthropodAttr::Galerias
            | ArthropodAttr::BrotesInfestados
            | ArthropodAttr::Hormigueros
            | ArthropodAttr::HojasFrutosAfectados
            | ArthropodAttr::FrutosAfectados => FieldKind::Number { min: 0.0, step: "1" },
            ArthropodAttr::DanoHojas => FieldKind::Select(DAMAGE_CHOICES),
            ArthropodAttr::NivelDano => FieldKind::Select(DAMAGE_LEVEL_CHOICES),
            ArthropodAttr::Mielecilla | ArthropodAttr::HormiguerosActivos => {
                FieldKind::Select(YES_NO_CHOICES)
            }
            ArthropodAttr::Estados => FieldKind::Checklist(LIFE_STAGE_CHOICES),
            ArthropodAttr::NombreInsecto | ArthropodAttr::NombreAcaro => FieldKind::Text,
            ArthropodAttr::UbicacionHormigueros => FieldKind::TextArea,
            ArthropodAttr::Fotos => FieldKind::Photo,
        }
    }

    fn rules(&self) -> ValidationRules {
        match self.kind() {
            FieldKind::Number { .. } => ValidationRules::non_negative(),
            FieldKind::Photo => ValidationRules::none(),
            _ => ValidationRules::required(),
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            ArthropodAttr::Fotos => {
                Some("Sube hasta 5 archivos compatibles. Tamaño máximo por archivo: 10 MB.")
            }
            ArthropodAttr::UbicacionHormigueros => Some(
                "Formato: SURCO - PLANTA - # HORMIGUEROS (separados por coma). \
                 Ej.: 2 - 4 - 6 Hormigueros, 3 - 6 - 1 Hormiguero",
            ),
            _ => None,
        }
    }

    fn placeholder(&self) -> Option<&'static str> {
        match self {
            ArthropodAttr::Fotos => Some("Ruta de la foto (simulado)"),
            ArthropodAttr::NombreInsecto => Some("Nombre del insecto"),
            ArthropodAttr::NombreAcaro => Some("Nombre del ácaro"),
            ArthropodAttr::Adultos => Some("Ej: 3"),
            ArthropodAttr::Hormigueros => Some("Ej: 6"),
            ArthropodAttr::UbicacionHormigueros => Some("Ej: 2 - 4 - 6 Hormigueros"),
            _ => None,
        }
    }
}

// ============================================================================
// "Other arthropod" block
// ============================================================================

pub const OTHER_CLASS_CHOICES: &[Choice] = &[("insecto", "Insecto"), ("acaro", "Ácaro")];

/// Free-form report of an arthropod outside the species tables; every field optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtherArthropodAttr {
    Sintomas,
    Clase,
    Nombre,
    Fotos,
}

impl OtherArthropodAttr {
    pub fn all() -> &'static [OtherArthropodAttr] {
        &[
            OtherArthropodAttr::Sintomas,
            OtherArthropodAttr::Clase,
            OtherArthropodAttr::Nombre,
            OtherArthropodAttr::Fotos,
        ]
    }
}

impl FieldAttribute for OtherArthropodAttr {
    fn key_segment(&self) -> &'static str {
        match self {
            OtherArthropodAttr::Sintomas => "sintomas",
            OtherArthropodAttr::Clase => "clase",
            OtherArthropodAttr::Nombre => "nombre",
            OtherArthropodAttr::Fotos => "fotos",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            OtherArthropodAttr::Sintomas => "Síntomas observados",
            OtherArthropodAttr::Clase => "Clase de artrópodo",
            OtherArthropodAttr::Nombre => "Nombre del artrópodo",
            OtherArthropodAttr::Fotos => "Fotos tomadas en campo de síntomas o del insecto",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            OtherArthropodAttr::Sintomas => FieldKind::TextArea,
            OtherArthropodAttr::Clase => FieldKind::Select(OTHER_CLASS_CHOICES),
            OtherArthropodAttr::Nombre => FieldKind::Text,
            OtherArthropodAttr::Fotos => FieldKind::Photo,
        }
    }

    fn rules(&self) -> ValidationRules {
        ValidationRules::none()
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            OtherArthropodAttr::Nombre => Some("Indique mínimo hasta género."),
            OtherArthropodAttr::Fotos => {
                Some("Sube hasta 5 archivos compatibles. Tamaño máximo por archivo: 10 MB.")
            }
            _ => None,
        }
    }

    fn placeholder(&self) -> Option<&'static str> {
        match self {
            OtherArthropodAttr::Fotos => Some("Ruta de la foto (simulado)"),
            _ => None,
        }
    }
}
