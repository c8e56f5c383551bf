pub mod aggregate;
pub mod generator;

pub use aggregate::{PhasePolicy, Planta, PlantaFenologica, GRID_POSITIONS, GRID_ROWS, SAMPLE_SIZE};
pub use generator::PlantGenerator;
