//! Range and Presence Checks for Raw Records

use crate::error::ValidationError;
use crate::record::RawInputRecord;
use serde::{Deserialize, Serialize};

/// Bounds for numeric form inputs.
///
/// Fields with their own clamp in the resolvers (garage cars, masonry and
/// pool area) are only checked for finiteness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Overall quality and condition grade (1-10)
    pub grade_range: (f64, f64),
    /// Lot area (sq ft)
    pub lot_area_range: (f64, f64),
    /// Lot frontage (ft)
    pub lot_frontage_range: (f64, f64),
    /// Above-grade living area (sq ft)
    pub gr_liv_area_range: (f64, f64),
    /// Any basement area (sq ft)
    pub basement_area_range: (f64, f64),
    /// Garage area (sq ft)
    pub garage_area_range: (f64, f64),
    /// Each porch area (sq ft)
    pub porch_area_range: (f64, f64),
    /// Full baths above grade
    pub full_bath_range: (f64, f64),
    /// Half baths above grade
    pub half_bath_range: (f64, f64),
    /// Basement full or half baths
    pub bsmt_bath_range: (f64, f64),
    /// Bedrooms above grade
    pub bedroom_range: (f64, f64),
    /// Kitchens above grade
    pub kitchen_range: (f64, f64),
    /// Total rooms above grade
    pub room_range: (f64, f64),
    /// Fireplaces
    pub fireplace_range: (f64, f64),
    /// Earliest accepted build or remodel year; the latest is the current year
    pub min_year: i32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            grade_range: (1.0, 10.0),
            lot_area_range: (1_000.0, 250_000.0),
            lot_frontage_range: (0.0, 350.0),
            gr_liv_area_range: (300.0, 6_000.0),
            basement_area_range: (0.0, 6_500.0),
            garage_area_range: (0.0, 1_500.0),
            porch_area_range: (0.0, 1_500.0),
            full_bath_range: (0.0, 4.0),
            half_bath_range: (0.0, 2.0),
            bsmt_bath_range: (0.0, 3.0),
            bedroom_range: (0.0, 8.0),
            kitchen_range: (0.0, 3.0),
            room_range: (2.0, 15.0),
            fireplace_range: (0.0, 4.0),
            min_year: 1850,
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Collapse into a single error, `None` when valid
    pub fn into_error(self) -> Option<ValidationError> {
        ValidationError::from_list(self.errors)
    }
}

/// Range checker for raw property records
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !(range.0..=range.1).contains(&value) {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Reject NaN and infinities
    pub fn validate_finite(&self, field: &'static str, value: f64) -> Result<(), ValidationError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ValidationError::NotFinite { field })
        }
    }

    /// Validate a build or remodel year against `[min_year, current_year]`
    pub fn validate_year(
        &self,
        field: &'static str,
        year: i32,
        current_year: i32,
    ) -> Result<(), ValidationError> {
        self.validate_range(
            field,
            f64::from(year),
            (f64::from(self.config.min_year), f64::from(current_year)),
        )
    }

    /// Check that every required primitive is present
    pub fn check_required(&self, raw: &RawInputRecord) -> Result<(), ValidationError> {
        let missing = [
            ("HouseStyle", raw.house_style.is_none()),
            ("MSSubClass", raw.ms_sub_class.is_none()),
            ("MSZoning", raw.ms_zoning.is_none()),
            ("Neighborhood", raw.neighborhood.is_none()),
            ("OverallQual", raw.overall_qual.is_none()),
            ("LotArea", raw.lot_area.is_none()),
            ("GrLivArea", raw.gr_liv_area.is_none()),
            ("YearBuilt", raw.year_built.is_none()),
        ]
        .into_iter()
        .find_map(|(field, missing)| missing.then_some(field));

        match missing {
            Some(field) => Err(ValidationError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// Run every range check and collect all violations
    pub fn check_ranges(&self, raw: &RawInputRecord, current_year: i32) -> ValidationResult {
        let c = &self.config;
        let mut results = vec![
            self.validate_range("OverallCond", f64::from(raw.overall_cond), c.grade_range),
            self.validate_range("LotFrontage", raw.lot_frontage, c.lot_frontage_range),
            self.validate_range("TotalBsmtSF", raw.total_bsmt_sf, c.basement_area_range),
            self.validate_range("BsmtFinSF1", raw.bsmt_fin_sf1, c.basement_area_range),
            self.validate_range("BsmtUnfSF", raw.bsmt_unf_sf, c.basement_area_range),
            self.validate_range("BsmtFullBath", f64::from(raw.bsmt_full_bath), c.bsmt_bath_range),
            self.validate_range("BsmtHalfBath", f64::from(raw.bsmt_half_bath), c.bsmt_bath_range),
            self.validate_range("FullBath", f64::from(raw.full_bath), c.full_bath_range),
            self.validate_range("HalfBath", f64::from(raw.half_bath), c.half_bath_range),
            self.validate_range("BedroomAbvGr", f64::from(raw.bedroom_abv_gr), c.bedroom_range),
            self.validate_range("KitchenAbvGr", f64::from(raw.kitchen_abv_gr), c.kitchen_range),
            self.validate_range("TotRmsAbvGrd", f64::from(raw.tot_rms_abv_grd), c.room_range),
            self.validate_range("Fireplaces", f64::from(raw.fireplaces), c.fireplace_range),
            self.validate_range("GarageArea", raw.garage_area, c.garage_area_range),
            self.validate_finite("MasVnrArea", raw.mas_vnr_area),
            self.validate_finite("PoolArea", raw.pool_area),
        ];

        if let Some(qual) = raw.overall_qual {
            results.push(self.validate_range("OverallQual", f64::from(qual), c.grade_range));
        }
        if let Some(lot_area) = raw.lot_area {
            results.push(self.validate_range("LotArea", lot_area, c.lot_area_range));
        }
        if let Some(gr) = raw.gr_liv_area {
            results.push(self.validate_range("GrLivArea", gr, c.gr_liv_area_range));
        }
        if let Some(first) = raw.first_flr_sf {
            results.push(self.validate_finite("1stFlrSF", first));
        }
        if let Some(year) = raw.year_built {
            results.push(self.validate_year("YearBuilt", year, current_year));
        }
        if let Some(year) = raw.year_remod_add {
            results.push(self.validate_year("YearRemodAdd", year, current_year));
        }
        for area in raw.porch_areas.values() {
            results.push(self.validate_range("PorchArea", *area, c.porch_area_range));
        }

        let fields_checked = results.len();
        let errors: Vec<ValidationError> = results.into_iter().filter_map(Result::err).collect();
        ValidationResult {
            valid: errors.is_empty(),
            errors,
            fields_checked,
        }
    }

    /// Finished plus unfinished basement area cannot exceed the total
    pub fn check_basement_areas(&self, raw: &RawInputRecord) -> Result<(), ValidationError> {
        let parts = raw.bsmt_fin_sf1 + raw.bsmt_unf_sf;
        if parts > raw.total_bsmt_sf {
            return Err(ValidationError::InconsistentInput {
                constraint: "basement_area",
                detail: format!(
                    "BsmtFinSF1 + BsmtUnfSF = {} exceeds TotalBsmtSF = {}",
                    parts, raw.total_bsmt_sf
                ),
            });
        }
        Ok(())
    }
}
