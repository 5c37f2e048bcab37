//! Price Inference Boundary
//!
//! Turns a canonical feature record into model input and runs a price model
//! over it. Ships a fixed-coefficient linear model for development.

mod engine;
mod model;
mod preprocess;

pub use engine::{InferenceEngine, PriceEstimate};
pub use model::{LinearPriceModel, PriceModel};
pub use preprocess::{OrdinalPreprocessor, Preprocessor};

use property_catalog::UnknownCategory;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Feature {feature} holds code {code:?} but is not categorical")]
    NotCategorical { feature: String, code: String },
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}
