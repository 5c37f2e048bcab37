//! Price Models

use crate::InferenceError;
use feature_engine::ExpectedFeatures;

/// A trained regressor over an encoded feature row
pub trait PriceModel: Send + Sync {
    fn predict(&self, row: &[f64]) -> Result<f64, InferenceError>;
}

/// Per-feature weights of the development model. Unlisted features weigh 0.
const MOCK_WEIGHTS: &[(&str, f64)] = &[
    ("OverallQual", 14_000.0),
    ("OverallCond", 2_500.0),
    ("LotArea", 0.4),
    ("TotalSF", 42.0),
    ("TotalBathrooms", 7_500.0),
    ("GarageCars", 6_000.0),
    ("Fireplaces", 3_500.0),
    ("TotalPorchSF", 20.0),
    ("PoolArea", 15.0),
    ("HouseAge", -350.0),
    ("HouseRemodelAge", -150.0),
];

const MOCK_INTERCEPT: f64 = 20_000.0;

/// `intercept + Σ weight · feature`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPriceModel {
    intercept: f64,
    weights: Vec<f64>,
}

impl LinearPriceModel {
    pub fn new(intercept: f64, weights: Vec<f64>) -> Self {
        Self { intercept, weights }
    }

    /// Fixed-coefficient model laid out for `expected`
    pub fn mock(expected: &ExpectedFeatures) -> Self {
        let weights = expected
            .names()
            .iter()
            .map(|name| {
                MOCK_WEIGHTS
                    .iter()
                    .find(|(feature, _)| feature == name)
                    .map_or(0.0, |(_, weight)| *weight)
            })
            .collect();
        Self::new(MOCK_INTERCEPT, weights)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl PriceModel for LinearPriceModel {
    fn predict(&self, row: &[f64]) -> Result<f64, InferenceError> {
        if row.len() != self.weights.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.weights.len().to_string(),
                actual: row.len().to_string(),
            });
        }

        let price = self.intercept + row.iter().zip(&self.weights).map(|(x, w)| x * w).sum::<f64>();
        if !price.is_finite() {
            return Err(InferenceError::InferenceFailed(format!("non-finite price {price}")));
        }
        // A sale price is never negative
        Ok(price.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_prediction() {
        let model = LinearPriceModel::new(1_000.0, vec![2.0, 0.5]);
        assert_eq!(model.predict(&[10.0, 4.0]).unwrap(), 1_022.0);
    }

    #[test]
    fn test_wrong_row_length() {
        let model = LinearPriceModel::new(0.0, vec![1.0]);
        assert!(matches!(
            model.predict(&[1.0, 2.0]),
            Err(InferenceError::InvalidInputShape { .. })
        ));
    }

    #[test]
    fn test_negative_price_floored() {
        let model = LinearPriceModel::new(0.0, vec![-1.0]);
        assert_eq!(model.predict(&[5.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_mock_weights_follow_schema() {
        let model = LinearPriceModel::mock(&ExpectedFeatures::new(["Street", "OverallQual"]));
        assert_eq!(model.weights(), [0.0, 14_000.0]);
    }
}
