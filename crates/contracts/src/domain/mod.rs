pub mod a001_questionnaire;
pub mod a002_sampling_unit;
pub mod a003_census;
pub mod a004_phenology;
pub mod a005_arthropod;
