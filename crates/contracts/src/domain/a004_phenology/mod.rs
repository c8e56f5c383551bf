pub mod aggregate;

pub use aggregate::{
    Phase, PhenologyAttr, PhenologyData, PhenologyPlantData, BBCH_FLOWERING, BBCH_FRUITING,
    BBCH_VEGETATIVE, PHASE_CHOICES,
};
