//! Property Input Validation and Constraint Resolution
//!
//! Range checking, structural checks and the conditional-zero group
//! resolvers that keep a raw property record internally consistent.

mod engine;
mod error;
mod record;
pub mod resolvers;
mod validator;
mod warning;

pub use engine::ConstraintEngine;
pub use error::ValidationError;
pub use record::{BasementGroup, PorchAreas, RawInputRecord, ResolvedRecord};
pub use resolvers::FloorSplit;
pub use validator::{ValidationConfig, ValidationResult, Validator};
pub use warning::{Resolution, Warning};
