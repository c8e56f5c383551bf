//! Flat answer keys of the survey form
//!
//! Every input of the form is stored under one string key in the
//! [`AnswerMap`](super::answer_map::AnswerMap). Keys are built only here, from
//! a typed scope, so purging a branch is a prefix removal.
//!
//! | scope | key |
//! |---|---|
//! | characterization | template field name verbatim |
//! | census | `censo_planta_{n}_{attr}` |
//! | phenology | `fenologico_planta_{n}_{attr}` |
//! | arthropod classes | `artropodo_planta_{n}_clases` |
//! | insect species | `artropodo_planta_{n}_insecto_tipo` |
//! | insect attribute | `artropodo_planta_{n}_insecto_{species}_{attr}` |
//! | mite species | `artropodo_planta_{n}_acaro_tipo` |
//! | mite attribute | `artropodo_planta_{n}_acaro_{species}_{attr}` |
//! | other arthropod | `artropodo_otro_{attr}` |
//!
//! Unit numbers `n` are 1-based.

use std::fmt;

use crate::domain::a003_census::CensusAttr;
use crate::domain::a004_phenology::PhenologyAttr;
use crate::domain::a005_arthropod::{
    ArthropodAttr, ArthropodClass, InsectSpecies, MiteSpecies, OtherArthropodAttr,
};
use crate::shared::metadata::FieldAttribute;

pub const CENSUS_PREFIX: &str = "censo_";
pub const PHENOLOGY_PREFIX: &str = "fenologico_";
pub const ARTHROPOD_PREFIX: &str = "artropodo_";

/// Prefixes owned by a monitoring type's sub-form
pub const MONITORING_PREFIXES: [&str; 3] = [CENSUS_PREFIX, PHENOLOGY_PREFIX, ARTHROPOD_PREFIX];

const UNIT_SEGMENT: &str = "planta_";

/// Typed scope of one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey<'a> {
    Characterization(&'a str),
    Census {
        unit: usize,
        attr: CensusAttr,
    },
    Phenology {
        unit: usize,
        attr: PhenologyAttr,
    },
    ArthropodClasses {
        unit: usize,
    },
    InsectSpecies {
        unit: usize,
    },
    Insect {
        unit: usize,
        species: InsectSpecies,
        attr: ArthropodAttr,
    },
    MiteSpecies {
        unit: usize,
    },
    Mite {
        unit: usize,
        species: MiteSpecies,
        attr: ArthropodAttr,
    },
    OtherArthropod(OtherArthropodAttr),
}

impl FieldKey<'_> {
    pub fn key(&self) -> String {
        match self {
            FieldKey::Characterization(name) => name.to_string(),
            FieldKey::Census { unit, attr } => {
                format!("{}{}", prefix::census_unit(*unit), attr.key_segment())
            }
            FieldKey::Phenology { unit, attr } => {
                format!("{}{}", prefix::phenology_unit(*unit), attr.key_segment())
            }
            FieldKey::ArthropodClasses { unit } => {
                format!("{}clases", prefix::arthropod_unit(*unit))
            }
            FieldKey::InsectSpecies { unit } => {
                format!("{}tipo", prefix::class(*unit, ArthropodClass::Insecto))
            }
            FieldKey::Insect {
                unit,
                species,
                attr,
            } => format!(
                "{}{}",
                prefix::insect_species(*unit, *species),
                attr.key_segment()
            ),
            FieldKey::MiteSpecies { unit } => {
                format!("{}tipo", prefix::class(*unit, ArthropodClass::Aracnido))
            }
            FieldKey::Mite {
                unit,
                species,
                attr,
            } => format!(
                "{}{}",
                prefix::mite_species(*unit, *species),
                attr.key_segment()
            ),
            FieldKey::OtherArthropod(attr) => {
                format!("{}otro_{}", ARTHROPOD_PREFIX, attr.key_segment())
            }
        }
    }
}

impl fmt::Display for FieldKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Prefix builders for bulk purge. Every prefix ends with `_`, so unit 1
/// never matches the keys of unit 10.
pub mod prefix {
    use super::*;

    pub fn census_unit(unit: usize) -> String {
        format!("{}{}{}_", CENSUS_PREFIX, UNIT_SEGMENT, unit)
    }

    pub fn phenology_unit(unit: usize) -> String {
        format!("{}{}{}_", PHENOLOGY_PREFIX, UNIT_SEGMENT, unit)
    }

    pub fn arthropod_unit(unit: usize) -> String {
        format!("{}{}{}_", ARTHROPOD_PREFIX, UNIT_SEGMENT, unit)
    }

    /// Everything recorded for one class of one unit, species choice included
    pub fn class(unit: usize, class: ArthropodClass) -> String {
        format!("{}{}_", arthropod_unit(unit), class.key_segment())
    }

    pub fn insect_species(unit: usize, species: InsectSpecies) -> String {
        format!(
            "{}{}_",
            class(unit, ArthropodClass::Insecto),
            species.key_segment()
        )
    }

    pub fn mite_species(unit: usize, species: MiteSpecies) -> String {
        format!(
            "{}{}_",
            class(unit, ArthropodClass::Aracnido),
            species.key_segment()
        )
    }
}

/// Key belongs to one sampled plant
pub fn is_unit_scoped(key: &str) -> bool {
    MONITORING_PREFIXES
        .iter()
        .any(|p| key.strip_prefix(p).is_some_and(|rest| rest.starts_with(UNIT_SEGMENT)))
}

/// Key belongs to some monitoring type's sub-form
pub fn is_monitoring_scoped(key: &str) -> bool {
    MONITORING_PREFIXES.iter().any(|p| key.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const UNITS: std::ops::RangeInclusive<usize> = 1..=12;

    fn every_scoped_key() -> Vec<(usize, String)> {
        let mut keys = Vec::new();
        for unit in UNITS {
            for attr in CensusAttr::all() {
                keys.push((unit, FieldKey::Census { unit, attr: *attr }.key()));
            }
            for attr in PhenologyAttr::all() {
                keys.push((unit, FieldKey::Phenology { unit, attr: *attr }.key()));
            }
            keys.push((unit, FieldKey::ArthropodClasses { unit }.key()));
            keys.push((unit, FieldKey::InsectSpecies { unit }.key()));
            keys.push((unit, FieldKey::MiteSpecies { unit }.key()));
            for species in InsectSpecies::all() {
                for attr in species.attributes() {
                    keys.push((
                        unit,
                        FieldKey::Insect {
                            unit,
                            species: *species,
                            attr: *attr,
                        }
                        .key(),
                    ));
                }
            }
            for species in MiteSpecies::all() {
                for attr in species.attributes() {
                    keys.push((
                        unit,
                        FieldKey::Mite {
                            unit,
                            species: *species,
                            attr: *attr,
                        }
                        .key(),
                    ));
                }
            }
        }
        keys
    }

    #[test]
    fn test_key_formats() {
        assert_eq!(
            FieldKey::Census {
                unit: 1,
                attr: CensusAttr::Altura
            }
            .key(),
            "censo_planta_1_altura"
        );
        assert_eq!(
            FieldKey::Phenology {
                unit: 2,
                attr: PhenologyAttr::FrutosBolaTenis
            }
            .key(),
            "fenologico_planta_2_frutos_bola_tenis"
        );
        assert_eq!(
            FieldKey::ArthropodClasses { unit: 3 }.key(),
            "artropodo_planta_3_clases"
        );
        assert_eq!(
            FieldKey::InsectSpecies { unit: 3 }.key(),
            "artropodo_planta_3_insecto_tipo"
        );
        assert_eq!(
            FieldKey::Insect {
                unit: 2,
                species: InsectSpecies::Compsus,
                attr: ArthropodAttr::Adultos
            }
            .key(),
            "artropodo_planta_2_insecto_compsus_adultos"
        );
        assert_eq!(
            FieldKey::Insect {
                unit: 4,
                species: InsectSpecies::Otro,
                attr: ArthropodAttr::NombreInsecto
            }
            .key(),
            "artropodo_planta_4_insecto_otro_nombre"
        );
        assert_eq!(
            FieldKey::Mite {
                unit: 5,
                species: MiteSpecies::Phyllocoptruta,
                attr: ArthropodAttr::HojasFrutosAfectados
            }
            .key(),
            "artropodo_planta_5_acaro_phyllocoptruta_frutos"
        );
        assert_eq!(
            FieldKey::OtherArthropod(OtherArthropodAttr::Sintomas).key(),
            "artropodo_otro_sintomas"
        );
        assert_eq!(FieldKey::Characterization("Nombre").key(), "Nombre");
    }

    #[test]
    fn test_no_two_scopes_share_a_key() {
        let mut keys: Vec<String> = every_scoped_key().into_iter().map(|(_, k)| k).collect();
        for attr in OtherArthropodAttr::all() {
            keys.push(FieldKey::OtherArthropod(*attr).key());
        }
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_unit_prefixes_do_not_overlap() {
        for (owner, key) in every_scoped_key() {
            assert!(is_unit_scoped(&key), "{}", key);
            assert!(is_monitoring_scoped(&key));
            for unit in UNITS {
                let owns = key.starts_with(&prefix::census_unit(unit))
                    || key.starts_with(&prefix::phenology_unit(unit))
                    || key.starts_with(&prefix::arthropod_unit(unit));
                assert_eq!(owns, unit == owner, "key {} unit {}", key, unit);
            }
        }
    }

    #[test]
    fn test_species_prefixes_are_disjoint() {
        for unit in UNITS {
            for a in InsectSpecies::all() {
                for b in InsectSpecies::all() {
                    if a != b {
                        let pa = prefix::insect_species(unit, *a);
                        let pb = prefix::insect_species(unit, *b);
                        assert!(!pa.starts_with(&pb) && !pb.starts_with(&pa));
                    }
                }
            }
            let species_key = FieldKey::InsectSpecies { unit }.key();
            for species in InsectSpecies::all() {
                assert!(!species_key.starts_with(&prefix::insect_species(unit, *species)));
            }
        }
    }

    #[test]
    fn test_top_level_keys() {
        assert!(!is_unit_scoped("¿Qué se va a monitorear?"));
        assert!(!is_monitoring_scoped("Nombre del técnico"));
        let other = FieldKey::OtherArthropod(OtherArthropodAttr::Nombre).key();
        assert!(is_monitoring_scoped(&other));
        assert!(!is_unit_scoped(&other));
    }
}
