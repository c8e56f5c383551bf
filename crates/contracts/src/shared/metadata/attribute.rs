//! Common shape of every per-plant attribute table

use super::field_type::FieldKind;
use super::types::FieldSpec;
use super::validation::ValidationRules;

/// Static description of one attribute of a plant observation.
///
/// Implemented by the closed attribute enums of each monitoring branch so the
/// renderer, the validation engine and the key scheme read the same table.
pub trait FieldAttribute: Copy {
    /// Last segment of the flat answer key
    fn key_segment(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn kind(&self) -> FieldKind;

    fn rules(&self) -> ValidationRules;

    fn hint(&self) -> Option<&'static str> {
        None
    }

    fn placeholder(&self) -> Option<&'static str> {
        None
    }

    /// Build the visible field for this attribute under `key`
    fn field_spec(&self, key: String) -> FieldSpec {
        FieldSpec::answer(key, self.label(), self.kind())
            .with_rules(self.rules())
            .with_hint(self.hint())
            .with_placeholder(self.placeholder())
    }
}
