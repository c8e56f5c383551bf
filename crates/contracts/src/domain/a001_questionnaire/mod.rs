pub mod aggregate;

pub use aggregate::{
    CharacterizationFieldKind, CharacterizationTemplate, FormTemplate, SectionTemplate,
    DAY_CONDITION_CHOICES,
};
