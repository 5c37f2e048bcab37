//! Inference Engine Implementation

use crate::model::{LinearPriceModel, PriceModel};
use crate::preprocess::{OrdinalPreprocessor, Preprocessor};
use crate::InferenceError;
use feature_engine::{CanonicalFeatureRecord, ExpectedFeatures};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Estimated sale price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Predicted price in dollars
    pub price: f64,
    /// Inference latency in milliseconds
    pub latency_ms: u64,
}

/// Preprocessor and model pair behind one call
pub struct InferenceEngine {
    preprocessor: Box<dyn Preprocessor>,
    model: Box<dyn PriceModel>,
    model_name: String,
}

impl InferenceEngine {
    pub fn new(
        model_name: &str,
        preprocessor: Box<dyn Preprocessor>,
        model: Box<dyn PriceModel>,
    ) -> Self {
        info!(
            "Creating inference engine {} over {} features",
            model_name,
            preprocessor.expected().len()
        );
        Self {
            preprocessor,
            model,
            model_name: model_name.to_string(),
        }
    }

    /// Mock engine over the canonical schema
    pub fn mock() -> Self {
        Self::mock_for(ExpectedFeatures::canonical())
    }

    /// Mock engine over a custom schema
    pub fn mock_for(expected: ExpectedFeatures) -> Self {
        let model = LinearPriceModel::mock(&expected);
        Self::new(
            "mock",
            Box::new(OrdinalPreprocessor::new(expected)),
            Box::new(model),
        )
    }

    /// Estimate the price for a canonical feature record
    pub async fn predict(
        &self,
        features: &CanonicalFeatureRecord,
    ) -> Result<PriceEstimate, InferenceError> {
        let start = std::time::Instant::now();

        let row = self.preprocessor.transform(features)?;
        let price = self.model.predict(&row)?;

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!("Inference completed in {}ms", latency_ms);

        Ok(PriceEstimate { price, latency_ms })
    }

    /// Feature names the model consumes
    pub fn expected(&self) -> &ExpectedFeatures {
        self.preprocessor.expected()
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constraint_engine::RawInputRecord;
    use feature_engine::FeaturePipeline;

    fn features(raw: &RawInputRecord) -> CanonicalFeatureRecord {
        FeaturePipeline::default()
            .with_current_year(2024)
            .derive(raw)
            .unwrap()
            .features
    }

    #[tokio::test]
    async fn test_mock_prediction() {
        let engine = InferenceEngine::mock();
        let estimate = engine.predict(&features(&RawInputRecord::typical())).await.unwrap();
        assert!(estimate.price > 0.0);
    }

    #[tokio::test]
    async fn test_better_quality_costs_more() {
        let engine = InferenceEngine::mock();
        let plain = engine.predict(&features(&RawInputRecord::typical())).await.unwrap();
        let fancy = engine
            .predict(&features(&RawInputRecord {
                overall_qual: Some(9),
                ..RawInputRecord::typical()
            }))
            .await
            .unwrap();
        assert!(fancy.price > plain.price);
    }

    #[tokio::test]
    async fn test_schema_mismatch() {
        let engine = InferenceEngine::mock_for(ExpectedFeatures::new(["OverallQual"]));
        let result = engine.predict(&features(&RawInputRecord::typical())).await;
        assert!(matches!(result, Err(InferenceError::InvalidInputShape { .. })));
    }
}
