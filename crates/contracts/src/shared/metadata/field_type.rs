//! Field kinds and bindings for the survey layout

/// One selectable option: (stored value, display label)
pub type Choice = (&'static str, &'static str);

/// Input widget a field is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    TextArea,
    Number {
        min: f64,
        step: &'static str,
    },
    Select(&'static [Choice]),
    /// Multi-select; the answer is the comma-joined list of checked values
    Checklist(&'static [Choice]),
    /// Photo upload placeholder, captured as a free-text path
    Photo,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "textarea",
            Self::Number { .. } => "number",
            Self::Select(_) => "select",
            Self::Checklist(_) => "checklist",
            Self::Photo => "photo",
        }
    }

    /// Options of a select or checklist, empty for free inputs
    pub fn choices(&self) -> &'static [Choice] {
        match self {
            Self::Select(choices) | Self::Checklist(choices) => choices,
            _ => &[],
        }
    }
}

/// What an input drives when it changes.
///
/// Plain answers are merged into the answer map; every other binding is a
/// structural transition of the session (and may purge keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldBinding {
    #[default]
    Answer,
    MonitoringType,
    Lot,
    Phase { unit: usize },
    ArthropodClasses { unit: usize },
    InsectSpecies { unit: usize },
    MiteSpecies { unit: usize },
}

impl FieldBinding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Answer => "answer",
            Self::MonitoringType => "monitoring_type",
            Self::Lot => "lot",
            Self::Phase { .. } => "phase",
            Self::ArthropodClasses { .. } => "arthropod_classes",
            Self::InsectSpecies { .. } => "insect_species",
            Self::MiteSpecies { .. } => "mite_species",
        }
    }

    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Answer)
    }
}
