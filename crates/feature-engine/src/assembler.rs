//! Feature Vector Assembly
//!
//! Two explicit passes: every expected feature starts at zero, then the
//! features this engine produces overwrite their slots. Expected names the
//! engine does not model stay zero; produced names the model does not expect
//! are dropped.

use crate::aggregates::DerivedAggregates;
use crate::schema::{CanonicalFeatureRecord, ExpectedFeatures, FeatureValue};
use constraint_engine::ResolvedRecord;
use tracing::debug;

/// Every feature derivable from a resolved record, keyed by model name
pub fn produced_features(
    record: &ResolvedRecord,
    aggregates: &DerivedAggregates,
) -> Vec<(&'static str, FeatureValue)> {
    let basement = &record.basement;
    let porches = &record.porches;

    vec![
        ("MSSubClass", FeatureValue::Code(record.ms_sub_class.to_string())),
        ("MSZoning", record.ms_zoning.into()),
        ("LotFrontage", record.lot_frontage.into()),
        ("LotArea", record.lot_area.into()),
        ("LotShape", record.lot_shape.into()),
        ("LotConfig", record.lot_config.into()),
        ("Neighborhood", record.neighborhood.into()),
        ("HouseStyle", record.house_style.code().into()),
        ("OverallQual", record.overall_qual.into()),
        ("OverallCond", record.overall_cond.into()),
        ("YearBuilt", record.year_built.into()),
        ("YearRemodAdd", record.year_remod_add.into()),
        ("MasVnrType", record.mas_vnr_type.into()),
        ("MasVnrArea", record.mas_vnr_area.into()),
        ("ExterQual", record.exter_qual.into()),
        ("ExterCond", record.exter_cond.into()),
        ("BsmtQual", basement.quality.into()),
        ("BsmtExposure", basement.exposure.into()),
        ("BsmtFinType1", basement.fin_type1.into()),
        ("BsmtFinSF1", basement.fin_sf1.into()),
        ("BsmtUnfSF", basement.unf_sf.into()),
        ("TotalBsmtSF", basement.total_sf.into()),
        ("Heating", record.heating.into()),
        ("HeatingQC", record.heating_qc.into()),
        ("CentralAir", record.central_air.into()),
        ("1stFlrSF", record.first_flr_sf.into()),
        ("2ndFlrSF", record.second_flr_sf.into()),
        ("GrLivArea", record.gr_liv_area.into()),
        ("BsmtFullBath", basement.full_bath.into()),
        ("BsmtHalfBath", basement.half_bath.into()),
        ("FullBath", record.full_bath.into()),
        ("HalfBath", record.half_bath.into()),
        ("BedroomAbvGr", record.bedroom_abv_gr.into()),
        ("KitchenAbvGr", record.kitchen_abv_gr.into()),
        ("KitchenQual", record.kitchen_qual.into()),
        ("TotRmsAbvGrd", record.tot_rms_abv_grd.into()),
        ("Functional", record.functional.into()),
        ("Fireplaces", record.fireplaces.into()),
        ("FireplaceQu", record.fireplace_qu.into()),
        ("GarageFinish", record.garage_finish.into()),
        ("GarageCars", record.garage_cars.into()),
        ("GarageArea", record.garage_area.into()),
        ("WoodDeckSF", porches.wood_deck_sf.into()),
        ("OpenPorchSF", porches.open_porch_sf.into()),
        ("EnclosedPorch", porches.enclosed_porch.into()),
        ("3SsnPorch", porches.three_ssn_porch.into()),
        ("ScreenPorch", porches.screen_porch.into()),
        ("PoolArea", record.pool_area.into()),
        ("TotalSF", aggregates.total_sf.into()),
        ("TotalBathrooms", aggregates.total_bathrooms.into()),
        ("TotalArea", aggregates.total_area.into()),
        ("TotalPorchSF", aggregates.total_porch_sf.into()),
        ("HouseAge", aggregates.house_age.into()),
        ("HouseRemodelAge", aggregates.house_remodel_age.into()),
    ]
}

/// Build a record whose key set is exactly `expected`
pub fn assemble(
    expected: &ExpectedFeatures,
    record: &ResolvedRecord,
    aggregates: &DerivedAggregates,
) -> CanonicalFeatureRecord {
    // Pass 1: defaults
    let mut features = CanonicalFeatureRecord::zeroed(expected);

    // Pass 2: overrides
    let mut written = 0;
    let mut dropped = Vec::new();
    for (name, value) in produced_features(record, aggregates) {
        if features.set(name, value) {
            written += 1;
        } else {
            dropped.push(name);
        }
    }

    debug!(
        "Assembled {} features: {} derived, {} left at zero, {} not expected",
        features.len(),
        written,
        features.len() - written,
        dropped.len()
    );

    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CANONICAL_FEATURES;
    use constraint_engine::{ConstraintEngine, RawInputRecord};
    use std::collections::HashSet;

    fn typical() -> (ResolvedRecord, DerivedAggregates) {
        let record = ConstraintEngine::default()
            .resolve(&RawInputRecord::typical(), 2024)
            .unwrap()
            .value;
        let aggregates = DerivedAggregates::compute(&record, 2024).unwrap();
        (record, aggregates)
    }

    #[test]
    fn test_produced_names_match_canonical_list() {
        let (record, aggregates) = typical();
        let produced: Vec<&str> = produced_features(&record, &aggregates)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(produced, CANONICAL_FEATURES);
    }

    #[test]
    fn test_unmodeled_features_stay_zero() {
        let (record, aggregates) = typical();
        let expected = ExpectedFeatures::new(["OverallQual", "Street", "TotalSF", "MiscVal"]);
        let features = assemble(&expected, &record, &aggregates);

        assert!(features.matches_schema(&expected));
        assert_eq!(features.number("OverallQual"), Some(6.0));
        assert_eq!(features.number("TotalSF"), Some(2_500.0));
        assert_eq!(features.number("Street"), Some(0.0));
        assert_eq!(features.number("MiscVal"), Some(0.0));
        assert!(features.get("GrLivArea").is_none());
    }

    #[test]
    fn test_canonical_schema_fully_populated() {
        let (record, aggregates) = typical();
        let features = assemble(&ExpectedFeatures::canonical(), &record, &aggregates);

        let names: HashSet<&str> = features.names().collect();
        assert_eq!(names.len(), CANONICAL_FEATURES.len());
        assert_eq!(features.code("MSSubClass"), Some("20"));
        assert_eq!(features.code("BsmtQual"), Some("TA"));
        assert_eq!(features.number("1stFlrSF"), Some(1_500.0));
        assert_eq!(features.number("TotalBathrooms"), Some(3.0));
    }

    #[test]
    fn test_empty_schema() {
        let (record, aggregates) = typical();
        let features = assemble(&ExpectedFeatures::new(Vec::<String>::new()), &record, &aggregates);
        assert!(features.is_empty());
    }
}
