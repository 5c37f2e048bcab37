//! Feature Derivation Routes

use axum::{extract::State, Json};
use constraint_engine::RawInputRecord;
use feature_engine::Derivation;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

/// Derive the canonical feature record for a submitted form
pub async fn derive_features(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawInputRecord>,
) -> Result<Json<Derivation>, ApiError> {
    Ok(Json(state.derive(&raw)?))
}
