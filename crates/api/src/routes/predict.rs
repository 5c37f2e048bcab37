//! Price Prediction Routes

use axum::{extract::State, Json};
use constraint_engine::{RawInputRecord, Warning};
use feature_engine::CanonicalFeatureRecord;
use inference_engine::PriceEstimate;
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

/// Response for the predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub estimate: PriceEstimate,
    pub model: String,
    pub features: CanonicalFeatureRecord,
    pub warnings: Vec<Warning>,
}

/// Derive features and estimate the sale price
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawInputRecord>,
) -> Result<Json<PredictResponse>, ApiError> {
    let derivation = state.derive(&raw)?;
    let estimate = state.inference.predict(&derivation.features).await?;
    metrics::counter!("predictions_total").increment(1);

    Ok(Json(PredictResponse {
        estimate,
        model: state.inference.model_name().to_string(),
        features: derivation.features,
        warnings: derivation.warnings,
    }))
}
