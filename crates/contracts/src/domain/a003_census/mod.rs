pub mod aggregate;

pub use aggregate::{CensusAttr, CensusData, CensusPlantData, OBSERVATION_CHOICES};
