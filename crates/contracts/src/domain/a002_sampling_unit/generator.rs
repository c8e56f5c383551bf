use rand::Rng;
use std::collections::HashSet;

use super::aggregate::{
    PhasePolicy, Planta, PlantaFenologica, GRID_POSITIONS, GRID_ROWS, SAMPLE_SIZE,
};
use crate::domain::a004_phenology::Phase;

/// Draws the sampled plants of a lot.
///
/// Generic over the random source so a seeded `StdRng` gives reproducible
/// samples in tests while the browser build seeds `StdRng::from_entropy`.
pub struct PlantGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> PlantGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Exactly `SAMPLE_SIZE` plants with pairwise distinct codes
    pub fn sample(&mut self) -> Vec<Planta> {
        let mut seen = HashSet::with_capacity(SAMPLE_SIZE);
        let mut plants = Vec::with_capacity(SAMPLE_SIZE);

        while plants.len() < SAMPLE_SIZE {
            let row = self.rng.gen_range(1..=GRID_ROWS);
            let position = self.rng.gen_range(1..=GRID_POSITIONS);
            if seen.insert((row, position)) {
                plants.push(Planta::new(row, position));
            }
        }

        log::info!(
            "Generated sampling units: {}",
            plants.iter().map(|p| p.codigo.as_str()).collect::<Vec<_>>().join(", ")
        );
        plants
    }

    /// Phenology units for `plants` under `policy`
    pub fn assign_phases(&mut self, plants: &[Planta], policy: PhasePolicy) -> Vec<PlantaFenologica> {
        plants
            .iter()
            .cloned()
            .map(|planta| match policy {
                PhasePolicy::UserAssigned => PlantaFenologica::unassigned(planta),
                PhasePolicy::Random => PlantaFenologica {
                    planta,
                    fase: Phase::random(&mut self.rng),
                },
            })
            .collect()
    }
}
