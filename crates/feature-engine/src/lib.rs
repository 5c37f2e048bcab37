//! Feature Derivation Engine
//!
//! Derived aggregates and schema-exact assembly of the feature record a price
//! model consumes, plus the `derive_features` entry point that runs the whole
//! chain from a raw property record.

mod aggregates;
mod assembler;
mod pipeline;
mod schema;

pub use aggregates::{age, total_area, total_bathrooms, total_porch_sf, total_sf, DerivedAggregates};
pub use assembler::{assemble, produced_features};
pub use pipeline::{derive_features, Derivation, FeaturePipeline};
pub use schema::{CanonicalFeatureRecord, ExpectedFeatures, FeatureValue, CANONICAL_FEATURES};

use constraint_engine::ValidationError;
use thiserror::Error;

/// Errors during feature derivation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DerivationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
