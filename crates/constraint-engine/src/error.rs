//! Validation Error Types

use property_catalog::UnknownCategory;
use thiserror::Error;

/// Structural violations that abort the current derivation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite numeric input
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// Fields that contradict each other beyond repair
    #[error("Inconsistent input: {detail}")]
    InconsistentInput {
        /// Short name of the violated constraint
        constraint: &'static str,
        detail: String,
    },

    /// Code not registered in the catalog
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// More than one range violation in the same record
    #[error("{} fields failed validation, first: {}", .0.len(), .0[0])]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Stable machine-readable name of the violation
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { .. } => "out_of_range",
            ValidationError::NotFinite { .. } => "not_finite",
            ValidationError::InconsistentInput { .. } => "inconsistent_input",
            ValidationError::UnknownCategory(_) => "unknown_category",
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::Multiple(_) => "multiple",
        }
    }

    /// Collapse a non-empty error list into a single error
    pub(crate) fn from_list(mut errors: Vec<ValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(ValidationError::Multiple(errors)),
        }
    }
}
