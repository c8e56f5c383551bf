/// Identification of a use case for logs and UI titles
pub trait UseCaseMetadata {
    /// Use case index (e.g. "u501")
    fn usecase_index() -> &'static str;

    /// Technical name (e.g. "field_survey")
    fn usecase_name() -> &'static str;

    /// Name shown in the UI
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Full name such as "u501_field_survey"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
