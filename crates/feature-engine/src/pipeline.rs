//! Raw record → canonical feature record

use crate::aggregates::DerivedAggregates;
use crate::assembler::assemble;
use crate::schema::{CanonicalFeatureRecord, ExpectedFeatures};
use crate::DerivationError;
use chrono::{Datelike, Utc};
use constraint_engine::{ConstraintEngine, RawInputRecord, ResolvedRecord, Warning};
use serde::Serialize;
use tracing::{debug, info};

/// Output of one derivation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derivation {
    /// Schema-exact features for the model
    pub features: CanonicalFeatureRecord,
    /// The repaired record the features were built from
    pub resolved: ResolvedRecord,
    pub aggregates: DerivedAggregates,
    /// Repairs made along the way
    pub warnings: Vec<Warning>,
}

/// Validation, resolution, aggregation and assembly in one place.
///
/// Holds only read-only state; share it behind an `Arc` to serve many
/// requests.
#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    engine: ConstraintEngine,
    expected: ExpectedFeatures,
    current_year: Option<i32>,
}

impl FeaturePipeline {
    pub fn new(engine: ConstraintEngine, expected: ExpectedFeatures) -> Self {
        info!("Creating feature pipeline with {} expected features", expected.len());
        Self {
            engine,
            expected,
            current_year: None,
        }
    }

    /// Pin the year ages are measured against instead of reading the clock
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    pub fn engine(&self) -> &ConstraintEngine {
        &self.engine
    }

    pub fn expected(&self) -> &ExpectedFeatures {
        &self.expected
    }

    pub fn current_year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| Utc::now().year())
    }

    /// Derive the canonical feature record for one raw input
    pub fn derive(&self, raw: &RawInputRecord) -> Result<Derivation, DerivationError> {
        let current_year = self.current_year();
        let resolution = self.engine.resolve(raw, current_year)?;
        let aggregates = DerivedAggregates::compute(&resolution.value, current_year)?;
        let features = assemble(&self.expected, &resolution.value, &aggregates);

        debug!(
            "Derived {} features with {} warnings",
            features.len(),
            resolution.warnings.len()
        );

        Ok(Derivation {
            features,
            resolved: resolution.value,
            aggregates,
            warnings: resolution.warnings,
        })
    }
}

/// Derive features against the canonical schema with default validation
pub fn derive_features(raw: &RawInputRecord) -> Result<Derivation, DerivationError> {
    FeaturePipeline::default().derive(raw)
}
