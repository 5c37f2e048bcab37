//! Constraint & Default Engine
//!
//! Turns one [`RawInputRecord`] into a [`ResolvedRecord`]: structural checks
//! first (fatal), then every group resolver (repairing).

use crate::error::ValidationError;
use crate::record::{BasementGroup, PorchAreas, RawInputRecord, ResolvedRecord};
use crate::resolvers::{
    resolve_basement_baths, resolve_basement_group, resolve_fireplace_group,
    resolve_floor_split, resolve_garage_area, resolve_garage_group, resolve_masonry_group,
    resolve_pool_group, resolve_porch_selection, resolve_remodel_year, resolve_subclass,
};
use crate::validator::{ValidationConfig, Validator};
use crate::warning::{Resolution, Warning};
use property_catalog::{Attribute, HouseStyle, PorchType};
use tracing::{debug, info, warn};

/// Validates and resolves raw records. Holds only read-only configuration,
/// so one instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct ConstraintEngine {
    validator: Validator,
}

impl ConstraintEngine {
    pub fn new(config: ValidationConfig) -> Self {
        info!("Creating constraint engine with config: {:?}", config);
        Self {
            validator: Validator::new(config),
        }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Validate `raw` and resolve every dependent field.
    ///
    /// `current_year` bounds the build and remodel years.
    pub fn resolve(
        &self,
        raw: &RawInputRecord,
        current_year: i32,
    ) -> Result<Resolution<ResolvedRecord>, ValidationError> {
        self.validator.check_required(raw)?;
        let ranges = self.validator.check_ranges(raw, current_year);
        debug!(
            "Checked {} ranges, {} violations",
            ranges.fields_checked,
            ranges.errors.len()
        );
        if let Some(err) = ranges.into_error() {
            debug!("Range validation failed: {}", err);
            return Err(err);
        }
        self.validator.check_basement_areas(raw)?;

        let mut warnings: Vec<Warning> = Vec::new();

        let house_style: HouseStyle = required(&raw.house_style, "HouseStyle")?.parse()?;
        let requested_subclass = raw
            .ms_sub_class
            .ok_or(ValidationError::MissingField("MSSubClass"))?;
        Attribute::MsSubClass.validate(&requested_subclass.to_string())?;
        let ms_sub_class =
            resolve_subclass(house_style.code(), requested_subclass).drain_into(&mut warnings);

        let gr_liv_area = raw
            .gr_liv_area
            .ok_or(ValidationError::MissingField("GrLivArea"))?
            .round();
        let floors = resolve_floor_split(house_style, ms_sub_class, gr_liv_area, raw.first_flr_sf)
            .drain_into(&mut warnings);
        if let Some(second) = raw.second_flr_sf {
            if second.round() != floors.second_flr_sf {
                warnings.push(Warning::SecondFloorOverridden {
                    requested: second,
                    resolved: floors.second_flr_sf,
                });
            }
        }

        let basement = self.resolve_basement(raw, &mut warnings)?;

        let garage_cars = resolve_garage_group(&raw.garage_finish, raw.garage_cars)?
            .drain_into(&mut warnings);
        let garage_area = resolve_garage_area(&raw.garage_finish, raw.garage_area.round())?
            .drain_into(&mut warnings);
        let mas_vnr_area = resolve_masonry_group(&raw.mas_vnr_type, raw.mas_vnr_area.round())?
            .drain_into(&mut warnings);
        let pool_area =
            resolve_pool_group(raw.has_pool, raw.pool_area.round()).drain_into(&mut warnings);
        let fireplace_qu = resolve_fireplace_group(raw.fireplaces, &raw.fireplace_qu)?
            .drain_into(&mut warnings);
        let porches = resolve_porches(raw)?.drain_into(&mut warnings);

        let year_built = raw.year_built.ok_or(ValidationError::MissingField("YearBuilt"))?;
        let year_remod_add =
            resolve_remodel_year(year_built, raw.year_remod_add).drain_into(&mut warnings);

        let record = ResolvedRecord {
            house_style,
            ms_sub_class,
            ms_zoning: Attribute::MsZoning.validate(required(&raw.ms_zoning, "MSZoning")?)?,
            neighborhood: Attribute::Neighborhood
                .validate(required(&raw.neighborhood, "Neighborhood")?)?,
            overall_qual: raw.overall_qual.ok_or(ValidationError::MissingField("OverallQual"))?,
            overall_cond: raw.overall_cond,
            lot_area: raw.lot_area.ok_or(ValidationError::MissingField("LotArea"))?.round(),
            lot_frontage: raw.lot_frontage.round(),
            lot_shape: Attribute::LotShape.validate(&raw.lot_shape)?,
            lot_config: Attribute::LotConfig.validate(&raw.lot_config)?,
            gr_liv_area,
            first_flr_sf: floors.first_flr_sf,
            second_flr_sf: floors.second_flr_sf,
            basement,
            full_bath: raw.full_bath,
            half_bath: raw.half_bath,
            bedroom_abv_gr: raw.bedroom_abv_gr,
            kitchen_abv_gr: raw.kitchen_abv_gr,
            kitchen_qual: Attribute::KitchenQual.validate(&raw.kitchen_qual)?,
            tot_rms_abv_grd: raw.tot_rms_abv_grd,
            heating: Attribute::Heating.validate(&raw.heating)?,
            heating_qc: Attribute::HeatingQc.validate(&raw.heating_qc)?,
            central_air: Attribute::CentralAir.validate(&raw.central_air)?,
            fireplaces: raw.fireplaces,
            fireplace_qu,
            mas_vnr_type: Attribute::MasVnrType.validate(&raw.mas_vnr_type)?,
            mas_vnr_area,
            exter_qual: Attribute::ExterQual.validate(&raw.exter_qual)?,
            exter_cond: Attribute::ExterCond.validate(&raw.exter_cond)?,
            functional: Attribute::Functional.validate(&raw.functional)?,
            garage_finish: Attribute::GarageFinish.validate(&raw.garage_finish)?,
            garage_cars,
            garage_area,
            has_pool: raw.has_pool,
            pool_area,
            porches,
            year_built,
            year_remod_add,
        };

        if !warnings.is_empty() {
            warn!("Resolved record with {} repairs", warnings.len());
            for warning in &warnings {
                debug!("Repair: {}", warning);
            }
        }

        Ok(Resolution {
            value: record,
            warnings,
        })
    }

    fn resolve_basement(
        &self,
        raw: &RawInputRecord,
        warnings: &mut Vec<Warning>,
    ) -> Result<BasementGroup, ValidationError> {
        let total_sf = raw.total_bsmt_sf.round();
        let fin_sf1 = raw.bsmt_fin_sf1.round();
        // Rounding each part on its own can overshoot the rounded total by one
        let unf_sf = raw.bsmt_unf_sf.round().min(total_sf - fin_sf1);

        let (quality, fin_type1, exposure) = resolve_basement_group(
            total_sf,
            &raw.bsmt_qual,
            &raw.bsmt_fin_type1,
            &raw.bsmt_exposure,
        )?
        .drain_into(warnings);
        let (full_bath, half_bath) =
            resolve_basement_baths(total_sf, raw.bsmt_full_bath, raw.bsmt_half_bath)
                .drain_into(warnings);

        Ok(BasementGroup {
            total_sf,
            fin_sf1,
            unf_sf,
            quality,
            fin_type1,
            exposure,
            full_bath,
            half_bath,
        })
    }
}

/// Parse the porch selection and area map, then apply the selection cap
fn resolve_porches(raw: &RawInputRecord) -> Result<Resolution<PorchAreas>, ValidationError> {
    let selected = raw
        .porch_types
        .iter()
        .map(|code| code.parse::<PorchType>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut areas = PorchAreas::default();
    for (code, area) in &raw.porch_areas {
        areas.set(code.parse::<PorchType>()?, area.round());
    }

    Ok(resolve_porch_selection(&selected, &areas))
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    value.as_deref().ok_or(ValidationError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use property_catalog::UnknownCategory;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    const YEAR: i32 = 2024;

    fn resolve(raw: &RawInputRecord) -> Result<Resolution<ResolvedRecord>, ValidationError> {
        ConstraintEngine::default().resolve(raw, YEAR)
    }

    #[test]
    fn test_typical_record_resolves_cleanly() {
        let resolution = resolve(&RawInputRecord::typical()).unwrap();
        assert!(resolution.is_clean(), "{:?}", resolution.warnings);

        let record = resolution.value;
        assert_eq!(record.house_style, HouseStyle::OneStory);
        assert_eq!(record.first_flr_sf, 1_500.0);
        assert_eq!(record.second_flr_sf, 0.0);
        assert_eq!(record.basement.quality, "TA");
        assert_eq!(record.garage_cars, 2);
        assert_eq!(record.year_remod_add, 1975);
    }

    #[test]
    fn test_no_basement_with_quality_warns() {
        let raw = RawInputRecord {
            total_bsmt_sf: 0.0,
            bsmt_fin_sf1: 0.0,
            bsmt_unf_sf: 0.0,
            bsmt_qual: "Gd".to_string(),
            bsmt_full_bath: 1,
            ..RawInputRecord::typical()
        };
        let resolution = resolve(&raw).unwrap();
        let basement = &resolution.value.basement;

        assert_eq!(basement.quality, "NA");
        assert_eq!(basement.fin_type1, "NA");
        assert_eq!(basement.exposure, "NA");
        assert_eq!((basement.full_bath, basement.half_bath), (0, 0));
        assert!(resolution
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::GateCleared { field: "BsmtQual", .. })));
    }

    #[test]
    fn test_basement_parts_exceeding_total_is_fatal() {
        let raw = RawInputRecord {
            total_bsmt_sf: 800.0,
            bsmt_fin_sf1: 600.0,
            bsmt_unf_sf: 400.0,
            ..RawInputRecord::typical()
        };
        assert!(matches!(
            resolve(&raw),
            Err(ValidationError::InconsistentInput { .. })
        ));
    }

    #[test]
    fn test_fractional_basement_parts_stay_within_total() {
        let raw = RawInputRecord {
            total_bsmt_sf: 100.4,
            bsmt_fin_sf1: 50.5,
            bsmt_unf_sf: 49.9,
            ..RawInputRecord::typical()
        };
        let basement = resolve(&raw).unwrap().value.basement;

        assert_eq!(basement.total_sf, 100.0);
        assert_eq!(basement.fin_sf1, 51.0);
        assert_eq!(basement.unf_sf, 49.0);
        assert!(basement.fin_sf1 + basement.unf_sf <= basement.total_sf);
    }

    #[test]
    fn test_unknown_code_is_fatal() {
        let raw = RawInputRecord {
            neighborhood: Some("Atlantis".to_string()),
            ..RawInputRecord::typical()
        };
        assert_eq!(
            resolve(&raw).unwrap_err(),
            ValidationError::UnknownCategory(UnknownCategory::new(
                Attribute::Neighborhood,
                "Atlantis"
            ))
        );

        let raw = RawInputRecord {
            house_style: Some("Castle".to_string()),
            ..RawInputRecord::typical()
        };
        assert!(matches!(resolve(&raw), Err(ValidationError::UnknownCategory(_))));
    }

    #[test]
    fn test_unknown_porch_code_is_fatal() {
        let raw = RawInputRecord {
            porch_types: vec!["Balcony".to_string()],
            ..RawInputRecord::typical()
        };
        assert!(matches!(resolve(&raw), Err(ValidationError::UnknownCategory(_))));
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let raw = RawInputRecord {
            year_built: None,
            ..RawInputRecord::typical()
        };
        assert_eq!(resolve(&raw).unwrap_err(), ValidationError::MissingField("YearBuilt"));
    }

    #[test]
    fn test_subclass_out_of_table_is_repaired() {
        let raw = RawInputRecord {
            house_style: Some("2Story".to_string()),
            ms_sub_class: Some(20),
            first_flr_sf: Some(900.0),
            ..RawInputRecord::typical()
        };
        let resolution = resolve(&raw).unwrap();
        assert_eq!(resolution.value.ms_sub_class, 60);
        assert_eq!(resolution.value.first_flr_sf, 900.0);
        assert_eq!(resolution.value.second_flr_sf, 600.0);
    }

    #[test]
    fn test_second_floor_input_is_overridden() {
        let raw = RawInputRecord {
            house_style: Some("2Story".to_string()),
            ms_sub_class: Some(60),
            first_flr_sf: Some(1_000.0),
            second_flr_sf: Some(700.0),
            ..RawInputRecord::typical()
        };
        let resolution = resolve(&raw).unwrap();
        assert_eq!(resolution.value.second_flr_sf, 500.0);
        assert!(resolution
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::SecondFloorOverridden { .. })));
    }

    #[test]
    fn test_garage_and_masonry_gates() {
        let raw = RawInputRecord {
            garage_finish: "NA".to_string(),
            garage_cars: 2,
            garage_area: 400.0,
            mas_vnr_type: "None".to_string(),
            mas_vnr_area: 150.0,
            ..RawInputRecord::typical()
        };
        let record = resolve(&raw).unwrap().value;
        assert_eq!(record.garage_cars, 0);
        assert_eq!(record.garage_area, 0.0);
        assert_eq!(record.mas_vnr_area, 0.0);
    }

    #[test]
    fn test_raw_record_is_not_mutated() {
        let raw = RawInputRecord {
            total_bsmt_sf: 0.0,
            bsmt_fin_sf1: 0.0,
            bsmt_unf_sf: 0.0,
            ..RawInputRecord::typical()
        };
        let before = raw.clone();
        resolve(&raw).unwrap();
        assert_eq!(raw, before);
    }

    proptest! {
        #[test]
        fn prop_resolution_is_idempotent_and_consistent(
            total_bsmt in 0u32..3_000,
            fin_share in 0.0f64..=1.0,
            garage_cars in -2i32..8,
            finish in prop::sample::select(vec!["Fin", "RFn", "Unf", "NA"]),
            mas_type in prop::sample::select(vec!["BrkFace", "Stone", "None"]),
            porches in prop::collection::vec(
                prop::sample::select(vec![
                    "WoodDeckSF",
                    "OpenPorchSF",
                    "EnclosedPorch",
                    "3SsnPorch",
                    "ScreenPorch",
                ]),
                0..6,
            ),
        ) {
            let total = f64::from(total_bsmt);
            let fin = (total * fin_share).floor();
            let raw = RawInputRecord {
                total_bsmt_sf: total,
                bsmt_fin_sf1: fin,
                bsmt_unf_sf: total - fin,
                bsmt_qual: "Gd".to_string(),
                garage_finish: finish.to_string(),
                garage_cars,
                mas_vnr_type: mas_type.to_string(),
                mas_vnr_area: 200.0,
                porch_types: porches.iter().map(|p| p.to_string()).collect(),
                porch_areas: BTreeMap::from([
                    ("WoodDeckSF".to_string(), 100.0),
                    ("ScreenPorch".to_string(), 50.0),
                ]),
                ..RawInputRecord::typical()
            };

            let first = resolve(&raw).unwrap();
            let second = resolve(&raw).unwrap();
            prop_assert_eq!(&first, &second);

            let record = first.value;
            if total == 0.0 {
                prop_assert_eq!(record.basement.quality, "NA");
                prop_assert_eq!(record.basement.full_bath + record.basement.half_bath, 0);
            }
            if finish == "NA" {
                prop_assert_eq!(record.garage_cars, 0);
            }
            if mas_type == "None" {
                prop_assert_eq!(record.mas_vnr_area, 0.0);
            }
            prop_assert!(record.porches.active().len() <= 3);
            prop_assert_eq!(record.first_flr_sf + record.second_flr_sf, record.gr_liv_area);
        }
    }
}
