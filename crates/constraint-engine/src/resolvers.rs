//! Conditional-Zero Group Resolvers
//!
//! Pure functions that pick a consistent value for each dependent field
//! given its gate. They repair and warn on recoverable conflicts; only codes
//! missing from the catalog are errors. The form calls them on every edit,
//! and [`crate::ConstraintEngine`] calls all of them for a full record.

use crate::record::PorchAreas;
use crate::warning::{Resolution, Warning};
use property_catalog::{
    Attribute, CompatibilityTable, HouseStyle, PorchType, UnknownCategory, ATTIC_SUBCLASS,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Largest garage capacity offered (cars)
pub const MAX_GARAGE_CARS: i32 = 5;
/// Largest masonry veneer area (sq ft)
pub const MAX_MASONRY_AREA: f64 = 1_500.0;
/// Largest pool area (sq ft)
pub const MAX_POOL_AREA: f64 = 750.0;
/// Porch types that may be active at once
pub const MAX_ACTIVE_PORCHES: usize = 3;
/// Smallest area either floor of a multi-floor home may have (sq ft)
pub const MIN_FLOOR_SF: f64 = 100.0;

/// Keep `requested` if the style allows it, otherwise use the style default.
///
/// An unknown style is not an error here: the first catalog subclass is used
/// and the mismatch is reported as a warning.
pub fn resolve_subclass(style: &str, requested: u16) -> Resolution<u16> {
    let table = CompatibilityTable::standard();

    let Ok(parsed) = style.parse::<HouseStyle>() else {
        let resolved = table.first_global_code();
        warn!("Unknown house style {:?}, falling back to subclass {}", style, resolved);
        return Resolution::repaired(
            resolved,
            Warning::UnknownStyle {
                style: style.to_string(),
                resolved,
            },
        );
    };

    if table.is_allowed(parsed, requested) {
        return Resolution::clean(requested);
    }

    let resolved = table.default_subclass(parsed);
    debug!("Subclass {} not offered for {}, using {}", requested, parsed, resolved);
    Resolution::repaired(
        resolved,
        Warning::SubclassReplaced {
            style: parsed.code().to_string(),
            requested,
            resolved,
        },
    )
}

/// Resolve a categorical field whose validity depends on a gate.
///
/// Gate absent: the sentinel, whatever was asked. Gate present: the request,
/// unless it is the sentinel, in which case the attribute default.
pub fn resolve_gated_code(
    attribute: Attribute,
    present: bool,
    gate: &'static str,
    requested: &str,
) -> Result<Resolution<&'static str>, UnknownCategory> {
    let requested = attribute.validate(requested)?;
    let Some(sentinel) = attribute.sentinel() else {
        return Ok(Resolution::clean(requested));
    };

    let field = attribute.feature_name();
    let resolution = match (present, requested == sentinel) {
        (false, true) | (true, false) => Resolution::clean(requested),
        (false, false) => Resolution::repaired(
            sentinel,
            Warning::GateCleared {
                field,
                gate,
                requested: requested.to_string(),
                resolved: sentinel.to_string(),
            },
        ),
        (true, true) => {
            let resolved = attribute.default_code();
            Resolution::repaired(resolved, Warning::SentinelRepaired { field, resolved })
        }
    };

    if !resolution.is_clean() {
        debug!("{} {} resolved to {}", field, requested, resolution.value);
    }
    Ok(resolution)
}

/// Basement quality, first finish type and exposure, gated by total
/// basement area
pub fn resolve_basement_group(
    total_bsmt_sf: f64,
    requested_quality: &str,
    requested_fin_type: &str,
    requested_exposure: &str,
) -> Result<Resolution<(&'static str, &'static str, &'static str)>, UnknownCategory> {
    let present = total_bsmt_sf > 0.0;
    let mut warnings = Vec::new();

    let quality =
        resolve_gated_code(Attribute::BsmtQual, present, "TotalBsmtSF", requested_quality)?
            .drain_into(&mut warnings);
    let fin_type =
        resolve_gated_code(Attribute::BsmtFinType1, present, "TotalBsmtSF", requested_fin_type)?
            .drain_into(&mut warnings);
    let exposure =
        resolve_gated_code(Attribute::BsmtExposure, present, "TotalBsmtSF", requested_exposure)?
            .drain_into(&mut warnings);

    Ok(Resolution {
        value: (quality, fin_type, exposure),
        warnings,
    })
}

/// Basement full and half bath counts, zero without a basement
pub fn resolve_basement_baths(
    total_bsmt_sf: f64,
    full_bath: u8,
    half_bath: u8,
) -> Resolution<(u8, u8)> {
    if total_bsmt_sf > 0.0 {
        return Resolution::clean((full_bath, half_bath));
    }

    let warnings = [("BsmtFullBath", full_bath), ("BsmtHalfBath", half_bath)]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(field, count)| Warning::GateCleared {
            field,
            gate: "TotalBsmtSF",
            requested: count.to_string(),
            resolved: "0".to_string(),
        })
        .collect();

    Resolution {
        value: (0, 0),
        warnings,
    }
}

/// Garage capacity in cars: zero without a garage, else within
/// `[0, MAX_GARAGE_CARS]`
pub fn resolve_garage_group(
    finish: &str,
    requested_cars: i32,
) -> Result<Resolution<u8>, UnknownCategory> {
    let finish = Attribute::GarageFinish.validate(finish)?;

    if finish == "NA" {
        if requested_cars == 0 {
            return Ok(Resolution::clean(0));
        }
        return Ok(Resolution::repaired(
            0,
            Warning::GateCleared {
                field: "GarageCars",
                gate: "GarageFinish",
                requested: requested_cars.to_string(),
                resolved: "0".to_string(),
            },
        ));
    }

    let clamped = requested_cars.clamp(0, MAX_GARAGE_CARS);
    // clamped into 0..=5, fits u8
    let cars = clamped as u8;
    if clamped == requested_cars {
        Ok(Resolution::clean(cars))
    } else {
        Ok(Resolution::repaired(
            cars,
            Warning::Clamped {
                field: "GarageCars",
                requested: f64::from(requested_cars),
                resolved: f64::from(cars),
            },
        ))
    }
}

/// Garage area follows the same gate as the capacity
pub fn resolve_garage_area(
    finish: &str,
    requested_area: f64,
) -> Result<Resolution<f64>, UnknownCategory> {
    let finish = Attribute::GarageFinish.validate(finish)?;
    if finish == "NA" {
        return Ok(gate_to_zero("GarageArea", "GarageFinish", requested_area));
    }
    Ok(clamp_area("GarageArea", requested_area, f64::MAX))
}

/// Masonry veneer area: zero for veneer type "None", else within
/// `[0, MAX_MASONRY_AREA]`
pub fn resolve_masonry_group(
    mas_vnr_type: &str,
    requested_area: f64,
) -> Result<Resolution<f64>, UnknownCategory> {
    let mas_vnr_type = Attribute::MasVnrType.validate(mas_vnr_type)?;
    if mas_vnr_type == "None" {
        return Ok(gate_to_zero("MasVnrArea", "MasVnrType", requested_area));
    }
    Ok(clamp_area("MasVnrArea", requested_area, MAX_MASONRY_AREA))
}

/// Pool area: zero without a pool, else within `[0, MAX_POOL_AREA]`
pub fn resolve_pool_group(has_pool: bool, requested_area: f64) -> Resolution<f64> {
    if !has_pool {
        return gate_to_zero("PoolArea", "HasPool", requested_area);
    }
    clamp_area("PoolArea", requested_area, MAX_POOL_AREA)
}

/// Fireplace quality, "NA" when there is no fireplace
pub fn resolve_fireplace_group(
    fireplaces: u8,
    requested_quality: &str,
) -> Result<Resolution<&'static str>, UnknownCategory> {
    resolve_gated_code(Attribute::FireplaceQu, fireplaces > 0, "Fireplaces", requested_quality)
}

/// First and second floor areas
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloorSplit {
    pub first_flr_sf: f64,
    pub second_flr_sf: f64,
}

/// Split above-grade living area over the first and second floor.
///
/// Plain single-story homes put everything on the first floor. The attic
/// subclass and multi-floor styles take the requested first floor area,
/// bounded so each floor keeps at least [`MIN_FLOOR_SF`], and the second
/// floor is the remainder. Areas are whole square feet, so
/// `first_flr_sf + second_flr_sf == gr_liv_area` holds exactly.
pub fn resolve_floor_split(
    style: HouseStyle,
    subclass: u16,
    gr_liv_area: f64,
    requested_first_flr: Option<f64>,
) -> Resolution<FloorSplit> {
    let gr = gr_liv_area.max(0.0).round();
    let single_floor = FloorSplit {
        first_flr_sf: gr,
        second_flr_sf: 0.0,
    };

    if style.is_single_story() && subclass != ATTIC_SUBCLASS {
        return Resolution::clean(single_floor);
    }

    let requested = requested_first_flr.filter(|v| v.is_finite()).map(f64::round);
    let upper = gr - MIN_FLOOR_SF;

    if upper < MIN_FLOOR_SF {
        // too small for two floors
        return Resolution::repaired(
            single_floor,
            Warning::FloorSplitAdjusted {
                requested: requested.unwrap_or(gr),
                first_flr_sf: gr,
                second_flr_sf: 0.0,
            },
        );
    }

    let first = requested
        .unwrap_or_else(|| (gr / 2.0).round())
        .clamp(MIN_FLOOR_SF, upper);
    let split = FloorSplit {
        first_flr_sf: first,
        second_flr_sf: gr - first,
    };

    match requested {
        Some(requested) if requested != first => Resolution::repaired(
            split,
            Warning::FloorSplitAdjusted {
                requested,
                first_flr_sf: split.first_flr_sf,
                second_flr_sf: split.second_flr_sf,
            },
        ),
        _ => Resolution::clean(split),
    }
}

/// Keep at most [`MAX_ACTIVE_PORCHES`] porch types, in selection order.
///
/// Unselected and truncated types get area 0. Selecting the same type twice
/// counts once.
pub fn resolve_porch_selection(
    selected: &[PorchType],
    area_by_type: &PorchAreas,
) -> Resolution<PorchAreas> {
    let mut kept: Vec<PorchType> = Vec::with_capacity(MAX_ACTIVE_PORCHES);
    for porch in selected {
        if !kept.contains(porch) {
            kept.push(*porch);
        }
    }
    let dropped = if kept.len() > MAX_ACTIVE_PORCHES {
        kept.split_off(MAX_ACTIVE_PORCHES)
    } else {
        Vec::new()
    };

    let mut areas = PorchAreas::default();
    for porch in &kept {
        areas.set(*porch, area_by_type.get(*porch).max(0.0));
    }

    if dropped.is_empty() {
        Resolution::clean(areas)
    } else {
        debug!("Porch selection truncated, dropped {:?}", dropped);
        Resolution::repaired(areas, Warning::PorchSelectionTruncated { kept, dropped })
    }
}

/// Remodel year, defaulting to and never earlier than the build year
pub fn resolve_remodel_year(year_built: i32, requested: Option<i32>) -> Resolution<i32> {
    match requested {
        None => Resolution::clean(year_built),
        Some(year) if year < year_built => Resolution::repaired(
            year_built,
            Warning::RemodelYearRepaired {
                year_built,
                requested: year,
                resolved: year_built,
            },
        ),
        Some(year) => Resolution::clean(year),
    }
}

fn gate_to_zero(field: &'static str, gate: &'static str, requested: f64) -> Resolution<f64> {
    if requested == 0.0 {
        return Resolution::clean(0.0);
    }
    Resolution::repaired(
        0.0,
        Warning::GateCleared {
            field,
            gate,
            requested: requested.to_string(),
            resolved: "0".to_string(),
        },
    )
}

fn clamp_area(field: &'static str, requested: f64, max: f64) -> Resolution<f64> {
    let resolved = requested.clamp(0.0, max);
    if resolved == requested {
        Resolution::clean(resolved)
    } else {
        Resolution::repaired(
            resolved,
            Warning::Clamped {
                field,
                requested,
                resolved,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_subclass_kept_when_allowed() {
        let resolution = resolve_subclass("2Story", 160);
        assert_eq!(resolution.value, 160);
        assert!(resolution.is_clean());
    }

    #[test]
    fn test_subclass_replaced_by_style_default() {
        let resolution = resolve_subclass("2Story", 20);
        assert_eq!(resolution.value, 60);
        assert!(matches!(
            resolution.warnings[0],
            Warning::SubclassReplaced { requested: 20, resolved: 60, .. }
        ));
    }

    #[test]
    fn test_unknown_style_falls_back() {
        let resolution = resolve_subclass("Castle", 60);
        assert_eq!(resolution.value, 20);
        assert!(matches!(resolution.warnings[0], Warning::UnknownStyle { .. }));
    }

    #[test]
    fn test_no_basement_forces_sentinels() {
        let resolution = resolve_basement_group(0.0, "Gd", "GLQ", "Av").unwrap();
        assert_eq!(resolution.value, ("NA", "NA", "NA"));
        assert_eq!(resolution.warnings.len(), 3);
        assert!(matches!(
            &resolution.warnings[0],
            Warning::GateCleared { field: "BsmtQual", requested, .. } if requested == "Gd"
        ));
    }

    #[test]
    fn test_basement_sentinel_repaired() {
        let resolution = resolve_basement_group(800.0, "NA", "NA", "Gd").unwrap();
        assert_eq!(resolution.value, ("TA", "Unf", "Gd"));
        assert_eq!(resolution.warnings.len(), 2);
    }

    #[test]
    fn test_basement_unknown_code_is_error() {
        let err = resolve_basement_group(800.0, "Great", "GLQ", "Gd").unwrap_err();
        assert_eq!(err.attribute, Attribute::BsmtQual);
    }

    #[test]
    fn test_basement_baths_cleared() {
        let resolution = resolve_basement_baths(0.0, 1, 1);
        assert_eq!(resolution.value, (0, 0));
        assert_eq!(resolution.warnings.len(), 2);
        assert!(resolve_basement_baths(500.0, 1, 1).is_clean());
    }

    #[test]
    fn test_garage_gate_and_clamp() {
        assert_eq!(resolve_garage_group("NA", 3).unwrap().value, 0);
        assert_eq!(resolve_garage_group("Fin", 9).unwrap().value, 5);
        assert_eq!(resolve_garage_group("Fin", -1).unwrap().value, 0);
        assert!(resolve_garage_group("Fin", 2).unwrap().is_clean());
        assert!(resolve_garage_group("Carport", 2).is_err());
        assert_eq!(resolve_garage_area("NA", 300.0).unwrap().value, 0.0);
    }

    #[test]
    fn test_masonry_and_pool() {
        assert_eq!(resolve_masonry_group("None", 200.0).unwrap().value, 0.0);
        assert_eq!(resolve_masonry_group("Stone", 2_000.0).unwrap().value, 1_500.0);
        assert_eq!(resolve_pool_group(false, 400.0).value, 0.0);
        assert_eq!(resolve_pool_group(true, 900.0).value, 750.0);
        assert!(resolve_pool_group(true, 400.0).is_clean());
    }

    #[test]
    fn test_fireplace_gate() {
        assert_eq!(resolve_fireplace_group(0, "Gd").unwrap().value, "NA");
        assert_eq!(resolve_fireplace_group(1, "NA").unwrap().value, "TA");
        assert!(resolve_fireplace_group(2, "Ex").unwrap().is_clean());
    }

    #[test]
    fn test_single_story_floor_split() {
        let resolution = resolve_floor_split(HouseStyle::OneStory, 20, 1_500.0, None);
        assert_eq!(resolution.value.first_flr_sf, 1_500.0);
        assert_eq!(resolution.value.second_flr_sf, 0.0);
    }

    #[test]
    fn test_attic_floor_split() {
        let resolution =
            resolve_floor_split(HouseStyle::OneStory, ATTIC_SUBCLASS, 1_500.0, Some(1_100.0));
        assert_eq!(resolution.value.first_flr_sf, 1_100.0);
        assert_eq!(resolution.value.second_flr_sf, 400.0);
        assert!(resolution.is_clean());
    }

    #[test]
    fn test_multi_story_first_floor_clamped() {
        let resolution = resolve_floor_split(HouseStyle::TwoStory, 60, 1_800.0, Some(1_750.0));
        assert_eq!(resolution.value.first_flr_sf, 1_700.0);
        assert_eq!(resolution.value.second_flr_sf, 100.0);
        assert!(matches!(resolution.warnings[0], Warning::FloorSplitAdjusted { .. }));
    }

    #[test]
    fn test_tiny_multi_story_keeps_one_floor() {
        let resolution = resolve_floor_split(HouseStyle::TwoStory, 60, 150.0, Some(100.0));
        assert_eq!(resolution.value.first_flr_sf, 150.0);
        assert_eq!(resolution.value.second_flr_sf, 0.0);
    }

    #[test]
    fn test_porch_selection_truncated() {
        let areas = PorchAreas {
            wood_deck_sf: 100.0,
            open_porch_sf: 50.0,
            enclosed_porch: 80.0,
            three_ssn_porch: 0.0,
            screen_porch: 120.0,
        };
        let selected = [
            PorchType::ScreenPorch,
            PorchType::WoodDeck,
            PorchType::OpenPorch,
            PorchType::EnclosedPorch,
        ];
        let resolution = resolve_porch_selection(&selected, &areas);

        assert_eq!(resolution.value.screen_porch, 120.0);
        assert_eq!(resolution.value.wood_deck_sf, 100.0);
        assert_eq!(resolution.value.open_porch_sf, 50.0);
        assert_eq!(resolution.value.enclosed_porch, 0.0);
        assert_eq!(
            resolution.warnings,
            vec![Warning::PorchSelectionTruncated {
                kept: vec![PorchType::ScreenPorch, PorchType::WoodDeck, PorchType::OpenPorch],
                dropped: vec![PorchType::EnclosedPorch],
            }]
        );
    }

    #[test]
    fn test_porch_unselected_types_are_zero() {
        let areas = PorchAreas {
            wood_deck_sf: 100.0,
            open_porch_sf: 50.0,
            ..Default::default()
        };
        let resolution =
            resolve_porch_selection(&[PorchType::OpenPorch, PorchType::OpenPorch], &areas);
        assert_eq!(resolution.value.wood_deck_sf, 0.0);
        assert_eq!(resolution.value.open_porch_sf, 50.0);
        assert!(resolution.is_clean());
    }

    #[test]
    fn test_remodel_year() {
        assert_eq!(resolve_remodel_year(1990, None).value, 1990);
        assert_eq!(resolve_remodel_year(1990, Some(2005)).value, 2005);
        let repaired = resolve_remodel_year(1990, Some(1980));
        assert_eq!(repaired.value, 1990);
        assert!(!repaired.is_clean());
    }

    fn any_style() -> impl Strategy<Value = HouseStyle> {
        (0usize..HouseStyle::ALL.len()).prop_map(|i| HouseStyle::ALL[i])
    }

    proptest! {
        #[test]
        fn prop_floor_split_sums_to_living_area(
            style in any_style(),
            subclass in prop::sample::select(vec![20u16, 30, 40, 50, 60, 75, 80, 85, 190]),
            gr in 0u32..8_000,
            requested in proptest::option::of(-500i32..9_000),
        ) {
            let gr = f64::from(gr);
            let split = resolve_floor_split(style, subclass, gr, requested.map(f64::from)).value;
            prop_assert_eq!(split.first_flr_sf + split.second_flr_sf, gr);
            prop_assert!(split.second_flr_sf >= 0.0);
            if style.is_single_story() && subclass != ATTIC_SUBCLASS {
                prop_assert_eq!(split.first_flr_sf, gr);
                prop_assert_eq!(split.second_flr_sf, 0.0);
            }
        }

        #[test]
        fn prop_subclass_always_allowed(style in any_style(), requested in 0u16..200) {
            let resolved = resolve_subclass(style.code(), requested).value;
            prop_assert!(CompatibilityTable::standard().is_allowed(style, resolved));
        }

        #[test]
        fn prop_basement_gate(
            total in prop::sample::select(vec![0.0f64, 1.0, 850.0]),
            quality in prop::sample::select(vec!["Ex", "Gd", "TA", "Fa", "Po", "NA"]),
            exposure in prop::sample::select(vec!["Gd", "Av", "Mn", "No", "NA"]),
        ) {
            let (q, f, e) = resolve_basement_group(total, quality, "GLQ", exposure).unwrap().value;
            if total == 0.0 {
                prop_assert_eq!((q, f, e), ("NA", "NA", "NA"));
            } else {
                prop_assert!(q != "NA" && f != "NA" && e != "NA");
            }
        }

        #[test]
        fn prop_garage_and_masonry_gates(cars in -10i32..20, area in 0.0f64..3_000.0) {
            prop_assert_eq!(resolve_garage_group("NA", cars).unwrap().value, 0);
            prop_assert!(resolve_garage_group("Unf", cars).unwrap().value <= 5);
            prop_assert_eq!(resolve_masonry_group("None", area).unwrap().value, 0.0);
            prop_assert!(resolve_masonry_group("BrkFace", area).unwrap().value <= MAX_MASONRY_AREA);
        }

        #[test]
        fn prop_at_most_three_porches(
            selected in prop::collection::vec(0usize..PorchType::ALL.len(), 0..8),
        ) {
            let selected: Vec<PorchType> =
                selected.into_iter().map(|i| PorchType::ALL[i]).collect();
            let all = PorchAreas {
                wood_deck_sf: 10.0,
                open_porch_sf: 20.0,
                enclosed_porch: 30.0,
                three_ssn_porch: 40.0,
                screen_porch: 50.0,
            };
            let resolved = resolve_porch_selection(&selected, &all).value;
            prop_assert!(resolved.active().len() <= MAX_ACTIVE_PORCHES);
        }
    }
}
