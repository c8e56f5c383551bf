pub mod aggregate;
pub mod observation;

pub use aggregate::{
    ArthropodAttr, ArthropodClass, InsectSpecies, MiteSpecies, OtherArthropodAttr, CLASS_CHOICES,
    INSECT_CHOICES, LIFE_STAGE_CHOICES, MITE_CHOICES, OTHER_CLASS_CHOICES,
};
pub use observation::{
    ArthropodData, ArthropodPlantData, AttrReader, InsectObservation, MiteObservation,
    OtherArthropodData,
};
