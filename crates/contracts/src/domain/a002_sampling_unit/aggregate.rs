use serde::{Deserialize, Serialize};

use crate::domain::a004_phenology::Phase;

/// Plants sampled per monitored lot
pub const SAMPLE_SIZE: usize = 5;

/// Rows per lot in the sampling grid
pub const GRID_ROWS: u32 = 20;

/// Plants per row in the sampling grid
pub const GRID_POSITIONS: u32 = 20;

/// A sampled plant, identified by its row and position in the lot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Planta {
    pub codigo: String,
    pub label: String,
}

impl Planta {
    pub fn new(row: u32, position: u32) -> Self {
        Self {
            codigo: format!("{}-{}", row, position),
            label: format!("Surco {}, Planta {}", row, position),
        }
    }
}

/// Sampled plant of the phenology branch, carrying its phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantaFenologica {
    #[serde(flatten)]
    pub planta: Planta,
    #[serde(default)]
    pub fase: Phase,
}

impl PlantaFenologica {
    pub fn unassigned(planta: Planta) -> Self {
        Self {
            planta,
            fase: Phase::Unset,
        }
    }
}

/// How phenology units get their phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhasePolicy {
    /// The surveyor picks the phase of every plant
    #[default]
    UserAssigned,
    /// Each plant receives a uniformly random phase at generation time
    Random,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_code_and_label() {
        let planta = Planta::new(3, 17);
        assert_eq!(planta.codigo, "3-17");
        assert_eq!(planta.label, "Surco 3, Planta 17");
    }

    #[test]
    fn test_phenology_unit_flattens_plant() {
        let unit = PlantaFenologica::unassigned(Planta::new(1, 2));
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["codigo"], "1-2");
        assert_eq!(json["label"], "Surco 1, Planta 2");
        assert_eq!(json["fase"], "");

        let back: PlantaFenologica =
            serde_json::from_str(r#"{"codigo":"1-2","label":"Surco 1, Planta 2","fase":"vegetativa"}"#)
                .unwrap();
        assert_eq!(back.fase, Phase::Vegetativa);
    }
}
