//! API Error Responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use constraint_engine::ValidationError;
use feature_engine::DerivationError;
use inference_engine::InferenceError;
use property_catalog::{UnknownAttribute, UnknownCategory};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
    #[error(transparent)]
    UnknownAttribute(#[from] UnknownAttribute),
    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),
}

impl From<DerivationError> for ApiError {
    fn from(err: DerivationError) -> Self {
        match err {
            DerivationError::Validation(inner) => ApiError::Validation(inner),
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::UnknownCategory(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::UnknownAttribute(_) => StatusCode::NOT_FOUND,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(err) => err.kind(),
            ApiError::UnknownCategory(_) => "unknown_category",
            ApiError::UnknownAttribute(_) => "unknown_attribute",
            ApiError::Inference(_) => "inference_failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use property_catalog::Attribute;

    #[test]
    fn test_validation_maps_to_422() {
        let err: ApiError = ValidationError::MissingField("HouseStyle").into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "missing_field");
    }

    #[test]
    fn test_derivation_unwrapped() {
        let err: ApiError =
            DerivationError::Validation(ValidationError::MissingField("LotArea")).into();
        assert!(matches!(err, ApiError::Validation(ValidationError::MissingField("LotArea"))));
    }

    #[test]
    fn test_unknown_category_maps_to_422() {
        let err: ApiError = UnknownCategory::new(Attribute::KitchenQual, "Superb").into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_unknown_attribute_maps_to_404() {
        let err: ApiError = UnknownAttribute("Roof".to_string()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
