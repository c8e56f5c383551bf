//! Validation rules for survey fields

use serde::{Deserialize, Serialize};

/// Why a raw numeric answer was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberViolation {
    /// Blank or not a finite decimal number
    NotANumber,
    /// Below the lower bound (or equal to it when the bound is exclusive)
    TooSmall,
    /// Above the upper bound
    TooLarge,
}

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationRules {
    pub required: bool,
    pub numeric: bool,
    pub min: Option<f64>,
    pub min_exclusive: bool,
    pub max: Option<f64>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            numeric: false,
            min: None,
            min_exclusive: false,
            max: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    /// Required number `>= 0` (counts)
    pub const fn non_negative() -> Self {
        Self {
            required: true,
            numeric: true,
            min: Some(0.0),
            ..Self::none()
        }
    }

    /// Required number `> 0` (measurements)
    pub const fn positive() -> Self {
        Self {
            required: true,
            numeric: true,
            min: Some(0.0),
            min_exclusive: true,
            max: None,
        }
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// A value counts as filled only when something other than whitespace is left
    pub fn is_filled(value: Option<&str>) -> bool {
        value.map(|v| !v.trim().is_empty()).unwrap_or(false)
    }

    /// Parse then range-check a raw answer.
    ///
    /// Returns the parsed value so callers never parse twice.
    pub fn check_number(&self, raw: &str) -> Result<f64, NumberViolation> {
        let value = parse_number(raw).ok_or(NumberViolation::NotANumber)?;

        if let Some(min) = self.min {
            if value < min || (self.min_exclusive && value == min) {
                return Err(NumberViolation::TooSmall);
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(NumberViolation::TooLarge);
            }
        }

        Ok(value)
    }

    /// Human description of the numeric domain, used in error messages
    pub fn domain_description(&self) -> String {
        match (self.min, self.min_exclusive) {
            (Some(min), true) => format!("mayor a {}", min),
            (Some(min), false) if min == 0.0 => "válido (cero o mayor)".to_string(),
            (Some(min), false) => format!("mayor o igual a {}", min),
            (None, _) => "válido".to_string(),
        }
    }
}

/// Parse a decimal answer the way the number inputs emit it ("1.50", " 3 ").
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
