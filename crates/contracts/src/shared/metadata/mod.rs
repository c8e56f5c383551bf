//! Field metadata shared by the renderer, the validation engine and the UI
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::metadata::{FieldKind, FieldSpec, ValidationRules};
//!
//! let spec = FieldSpec::answer("censo_planta_1_altura", "Altura de la planta (m)",
//!     FieldKind::Number { min: 0.0, step: "0.01" })
//!     .with_rules(ValidationRules::positive());
//! ```

mod attribute;
mod field_type;
mod types;
mod validation;

pub use attribute::FieldAttribute;
pub use field_type::{Choice, FieldBinding, FieldKind};
pub use types::FieldSpec;
pub use validation::{parse_number, NumberViolation, ValidationRules};
