//! Derived Aggregate Features

use crate::DerivationError;
use constraint_engine::{PorchAreas, ResolvedRecord, ValidationError};
use serde::Serialize;

/// Composite features computed from resolved primitives
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DerivedAggregates {
    /// First + second floor + finished + unfinished basement (sq ft)
    pub total_sf: f64,
    /// Full baths count 1, half baths 0.5, basement included
    pub total_bathrooms: f64,
    /// Above-grade living area + total basement area (sq ft)
    pub total_area: f64,
    /// Sum of all porch and deck areas (sq ft)
    pub total_porch_sf: f64,
    /// Years since construction
    pub house_age: i32,
    /// Years since the last remodel
    pub house_remodel_age: i32,
}

impl DerivedAggregates {
    /// Compute aggregates for a resolved record.
    ///
    /// Fails if finished plus unfinished basement area exceeds the total,
    /// which the engine should already have rejected.
    pub fn compute(record: &ResolvedRecord, current_year: i32) -> Result<Self, DerivationError> {
        let basement = &record.basement;
        if basement.fin_sf1 + basement.unf_sf > basement.total_sf {
            return Err(ValidationError::InconsistentInput {
                constraint: "basement_area",
                detail: format!(
                    "BsmtFinSF1 + BsmtUnfSF = {} exceeds TotalBsmtSF = {}",
                    basement.fin_sf1 + basement.unf_sf,
                    basement.total_sf
                ),
            }
            .into());
        }

        Ok(Self {
            total_sf: total_sf(
                record.first_flr_sf,
                record.second_flr_sf,
                basement.fin_sf1,
                basement.unf_sf,
            ),
            total_bathrooms: total_bathrooms(
                basement.full_bath,
                record.full_bath,
                record.half_bath,
                basement.half_bath,
            ),
            total_area: total_area(record.gr_liv_area, basement.total_sf),
            total_porch_sf: total_porch_sf(&record.porches),
            house_age: age(current_year, record.year_built),
            house_remodel_age: age(current_year, record.year_remod_add),
        })
    }
}

pub fn total_sf(first_flr_sf: f64, second_flr_sf: f64, bsmt_fin_sf: f64, bsmt_unf_sf: f64) -> f64 {
    first_flr_sf + second_flr_sf + bsmt_fin_sf + bsmt_unf_sf
}

pub fn total_bathrooms(
    bsmt_full_bath: u8,
    full_bath: u8,
    half_bath: u8,
    bsmt_half_bath: u8,
) -> f64 {
    f64::from(bsmt_full_bath)
        + f64::from(full_bath)
        + 0.5 * (f64::from(half_bath) + f64::from(bsmt_half_bath))
}

pub fn total_area(gr_liv_area: f64, total_bsmt_sf: f64) -> f64 {
    gr_liv_area + total_bsmt_sf
}

pub fn total_porch_sf(porches: &PorchAreas) -> f64 {
    porches.wood_deck_sf
        + porches.open_porch_sf
        + porches.enclosed_porch
        + porches.three_ssn_porch
        + porches.screen_porch
}

/// Whole years from `year` to `current_year`, never negative
pub fn age(current_year: i32, year: i32) -> i32 {
    (current_year - year).max(0)
}
