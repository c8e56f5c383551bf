pub mod renderer;
pub mod session;
pub mod submission;
pub mod validation;

pub use renderer::{render, FormLayout, FormSection, LOT_FIELD_KEY};
pub use session::{ArthropodUnitState, InputEvent, Sampler, SurveySession};
pub use submission::{assemble, SubmissionMetadata, SurveyPayload};
pub use validation::{validate, ValidationError};

use crate::usecases::common::UseCaseMetadata;

pub struct FieldSurvey;

impl UseCaseMetadata for FieldSurvey {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "field_survey"
    }

    fn display_name() -> &'static str {
        "Encuesta de monitoreo"
    }

    fn description() -> &'static str {
        "Caracterización y monitoreo planta a planta de un lote con envío al servidor"
    }
}
