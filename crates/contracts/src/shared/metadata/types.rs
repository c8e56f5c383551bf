//! Field specification produced by the section renderer

use super::field_type::{FieldBinding, FieldKind};
use super::validation::ValidationRules;

/// A single visible input of the survey form.
///
/// Carries no value: the layout is a pure function of the session
/// structure, values are read from the answer map by `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub hint: Option<&'static str>,
    pub placeholder: Option<String>,
    pub kind: FieldKind,
    pub binding: FieldBinding,
    pub validation: ValidationRules,
}

impl FieldSpec {
    /// Plain answer field
    pub fn answer(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            hint: None,
            placeholder: None,
            kind,
            binding: FieldBinding::Answer,
            validation: ValidationRules::none(),
        }
    }

    pub fn with_binding(mut self, binding: FieldBinding) -> Self {
        self.binding = binding;
        self
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.validation = rules;
        self
    }

    pub fn with_hint(mut self, hint: Option<&'static str>) -> Self {
        self.hint = hint;
        self
    }

    pub fn with_placeholder(mut self, placeholder: Option<&str>) -> Self {
        self.placeholder = placeholder.map(str::to_string);
        self
    }

    /// Check if field is optional
    pub fn is_optional(&self) -> bool {
        !self.validation.required
    }
}
