//! Feature Encoding

use crate::InferenceError;
use feature_engine::{CanonicalFeatureRecord, ExpectedFeatures, FeatureValue};
use property_catalog::Attribute;
use tracing::debug;

/// Converts a canonical feature record into the numeric row a model reads
pub trait Preprocessor: Send + Sync {
    /// Feature names the model was trained on, in column order
    fn expected(&self) -> &ExpectedFeatures;

    fn transform(&self, record: &CanonicalFeatureRecord) -> Result<Vec<f64>, InferenceError>;
}

/// Encodes categorical codes by their position in the catalog
#[derive(Debug, Clone)]
pub struct OrdinalPreprocessor {
    expected: ExpectedFeatures,
}

impl OrdinalPreprocessor {
    pub fn new(expected: ExpectedFeatures) -> Self {
        Self { expected }
    }

    fn encode(name: &str, value: &FeatureValue) -> Result<f64, InferenceError> {
        match value {
            FeatureValue::Number(n) => Ok(*n),
            FeatureValue::Code(code) => {
                let attribute: Attribute = name.parse().map_err(|_| InferenceError::NotCategorical {
                    feature: name.to_string(),
                    code: code.clone(),
                })?;
                Ok(attribute.ordinal(code)? as f64)
            }
        }
    }
}

impl Preprocessor for OrdinalPreprocessor {
    fn expected(&self) -> &ExpectedFeatures {
        &self.expected
    }

    fn transform(&self, record: &CanonicalFeatureRecord) -> Result<Vec<f64>, InferenceError> {
        if !record.matches_schema(&self.expected) {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("{} features {:?}", self.expected.len(), self.expected.names()),
                actual: format!(
                    "{} features {:?}",
                    record.len(),
                    record.names().collect::<Vec<_>>()
                ),
            });
        }

        let row = record
            .iter()
            .map(|(name, value)| Self::encode(name, value))
            .collect::<Result<Vec<f64>, _>>()?;

        debug!("Encoded {} features", row.len());
        Ok(row)
    }
}
