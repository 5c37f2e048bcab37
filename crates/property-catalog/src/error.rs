//! Catalog Error Types

use crate::attribute::Attribute;
use thiserror::Error;

/// A code or label that is not registered for an attribute
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {attribute} code {code:?}")]
pub struct UnknownCategory {
    /// Attribute the lookup was made against
    pub attribute: Attribute,
    /// The offending code (or label, for reverse lookups)
    pub code: String,
}

impl UnknownCategory {
    pub fn new(attribute: Attribute, code: impl Into<String>) -> Self {
        Self {
            attribute,
            code: code.into(),
        }
    }
}

/// A name that does not match any catalog attribute
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown attribute {0:?}")]
pub struct UnknownAttribute(pub String);
