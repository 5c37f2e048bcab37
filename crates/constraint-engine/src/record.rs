//! Property Input Records
//!
//! [`RawInputRecord`] mirrors the form one question per field. The engine
//! never mutates it; resolution produces a separate [`ResolvedRecord`].

use property_catalog::{HouseStyle, PorchType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property attributes exactly as entered.
///
/// Required primitives are optional here so that their absence surfaces as a
/// validation error rather than a parse failure. Categorical fields hold raw
/// catalog codes. Areas are in square feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputRecord {
    pub house_style: Option<String>,
    pub ms_sub_class: Option<u16>,
    pub ms_zoning: Option<String>,
    pub neighborhood: Option<String>,
    pub overall_qual: Option<u8>,
    pub overall_cond: u8,

    pub lot_area: Option<f64>,
    pub lot_frontage: f64,
    pub lot_shape: String,
    pub lot_config: String,

    pub gr_liv_area: Option<f64>,
    /// Requested first floor area; ignored for plain single-story homes
    pub first_flr_sf: Option<f64>,
    /// Accepted for completeness but always replaced by the remainder
    pub second_flr_sf: Option<f64>,

    pub total_bsmt_sf: f64,
    pub bsmt_fin_sf1: f64,
    pub bsmt_unf_sf: f64,
    pub bsmt_qual: String,
    pub bsmt_fin_type1: String,
    pub bsmt_exposure: String,
    pub bsmt_full_bath: u8,
    pub bsmt_half_bath: u8,

    pub full_bath: u8,
    pub half_bath: u8,
    pub bedroom_abv_gr: u8,
    pub kitchen_abv_gr: u8,
    pub kitchen_qual: String,
    pub tot_rms_abv_grd: u8,

    pub heating: String,
    pub heating_qc: String,
    pub central_air: String,

    pub fireplaces: u8,
    pub fireplace_qu: String,

    pub mas_vnr_type: String,
    pub mas_vnr_area: f64,

    pub exter_qual: String,
    pub exter_cond: String,
    pub functional: String,

    pub garage_finish: String,
    pub garage_cars: i32,
    pub garage_area: f64,

    pub has_pool: bool,
    pub pool_area: f64,

    /// Porch type codes in the order the user ticked them
    pub porch_types: Vec<String>,
    /// Area per porch type code
    pub porch_areas: BTreeMap<String, f64>,

    pub year_built: Option<i32>,
    /// Defaults to the build year when absent
    pub year_remod_add: Option<i32>,
}

impl Default for RawInputRecord {
    fn default() -> Self {
        Self {
            house_style: None,
            ms_sub_class: None,
            ms_zoning: None,
            neighborhood: None,
            overall_qual: None,
            overall_cond: 5,
            lot_area: None,
            lot_frontage: 0.0,
            lot_shape: "Reg".to_string(),
            lot_config: "Inside".to_string(),
            gr_liv_area: None,
            first_flr_sf: None,
            second_flr_sf: None,
            total_bsmt_sf: 0.0,
            bsmt_fin_sf1: 0.0,
            bsmt_unf_sf: 0.0,
            bsmt_qual: "NA".to_string(),
            bsmt_fin_type1: "NA".to_string(),
            bsmt_exposure: "NA".to_string(),
            bsmt_full_bath: 0,
            bsmt_half_bath: 0,
            full_bath: 1,
            half_bath: 0,
            bedroom_abv_gr: 3,
            kitchen_abv_gr: 1,
            kitchen_qual: "TA".to_string(),
            tot_rms_abv_grd: 6,
            heating: "GasA".to_string(),
            heating_qc: "TA".to_string(),
            central_air: "Y".to_string(),
            fireplaces: 0,
            fireplace_qu: "NA".to_string(),
            mas_vnr_type: "None".to_string(),
            mas_vnr_area: 0.0,
            exter_qual: "TA".to_string(),
            exter_cond: "TA".to_string(),
            functional: "Typ".to_string(),
            garage_finish: "NA".to_string(),
            garage_cars: 0,
            garage_area: 0.0,
            has_pool: false,
            pool_area: 0.0,
            porch_types: Vec::new(),
            porch_areas: BTreeMap::new(),
            year_built: None,
            year_remod_add: None,
        }
    }
}

impl RawInputRecord {
    /// A complete, consistent record for a typical one-story home with a
    /// basement and a two-car garage. Useful as a form preset.
    pub fn typical() -> Self {
        Self {
            house_style: Some("1Story".to_string()),
            ms_sub_class: Some(20),
            ms_zoning: Some("RL".to_string()),
            neighborhood: Some("NAmes".to_string()),
            overall_qual: Some(6),
            lot_area: Some(9_600.0),
            lot_frontage: 70.0,
            gr_liv_area: Some(1_500.0),
            total_bsmt_sf: 1_000.0,
            bsmt_fin_sf1: 600.0,
            bsmt_unf_sf: 400.0,
            bsmt_qual: "TA".to_string(),
            bsmt_fin_type1: "ALQ".to_string(),
            bsmt_exposure: "No".to_string(),
            bsmt_full_bath: 1,
            full_bath: 2,
            garage_finish: "RFn".to_string(),
            garage_cars: 2,
            garage_area: 480.0,
            porch_types: vec!["OpenPorchSF".to_string()],
            porch_areas: BTreeMap::from([("OpenPorchSF".to_string(), 60.0)]),
            year_built: Some(1975),
            ..Self::default()
        }
    }
}

/// Resolved basement attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasementGroup {
    pub total_sf: f64,
    pub fin_sf1: f64,
    pub unf_sf: f64,
    pub quality: &'static str,
    pub fin_type1: &'static str,
    pub exposure: &'static str,
    pub full_bath: u8,
    pub half_bath: u8,
}

/// Area per porch type, zero when the type is not active
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PorchAreas {
    pub wood_deck_sf: f64,
    pub open_porch_sf: f64,
    pub enclosed_porch: f64,
    pub three_ssn_porch: f64,
    pub screen_porch: f64,
}

impl PorchAreas {
    pub fn get(&self, porch: PorchType) -> f64 {
        match porch {
            PorchType::WoodDeck => self.wood_deck_sf,
            PorchType::OpenPorch => self.open_porch_sf,
            PorchType::EnclosedPorch => self.enclosed_porch,
            PorchType::ThreeSeason => self.three_ssn_porch,
            PorchType::ScreenPorch => self.screen_porch,
        }
    }

    pub fn set(&mut self, porch: PorchType, area: f64) {
        let slot = match porch {
            PorchType::WoodDeck => &mut self.wood_deck_sf,
            PorchType::OpenPorch => &mut self.open_porch_sf,
            PorchType::EnclosedPorch => &mut self.enclosed_porch,
            PorchType::ThreeSeason => &mut self.three_ssn_porch,
            PorchType::ScreenPorch => &mut self.screen_porch,
        };
        *slot = area;
    }

    /// Porch types with a non-zero area
    pub fn active(&self) -> Vec<PorchType> {
        PorchType::ALL
            .into_iter()
            .filter(|p| self.get(*p) > 0.0)
            .collect()
    }
}

/// Validated, repaired property record. Every categorical field holds a
/// catalog code and every conditional-zero group is consistent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRecord {
    pub house_style: HouseStyle,
    pub ms_sub_class: u16,
    pub ms_zoning: &'static str,
    pub neighborhood: &'static str,
    pub overall_qual: u8,
    pub overall_cond: u8,

    pub lot_area: f64,
    pub lot_frontage: f64,
    pub lot_shape: &'static str,
    pub lot_config: &'static str,

    pub gr_liv_area: f64,
    pub first_flr_sf: f64,
    pub second_flr_sf: f64,

    pub basement: BasementGroup,

    pub full_bath: u8,
    pub half_bath: u8,
    pub bedroom_abv_gr: u8,
    pub kitchen_abv_gr: u8,
    pub kitchen_qual: &'static str,
    pub tot_rms_abv_grd: u8,

    pub heating: &'static str,
    pub heating_qc: &'static str,
    pub central_air: &'static str,

    pub fireplaces: u8,
    pub fireplace_qu: &'static str,

    pub mas_vnr_type: &'static str,
    pub mas_vnr_area: f64,

    pub exter_qual: &'static str,
    pub exter_cond: &'static str,
    pub functional: &'static str,

    pub garage_finish: &'static str,
    pub garage_cars: u8,
    pub garage_area: f64,

    pub has_pool: bool,
    pub pool_area: f64,

    pub porches: PorchAreas,

    pub year_built: i32,
    pub year_remod_add: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let raw: RawInputRecord =
            serde_json::from_str(r#"{"house_style": "2Story", "gr_liv_area": 1800}"#).unwrap();
        assert_eq!(raw.house_style.as_deref(), Some("2Story"));
        assert_eq!(raw.gr_liv_area, Some(1800.0));
        assert_eq!(raw.bsmt_qual, "NA");
        assert_eq!(raw.ms_sub_class, None);
    }

    #[test]
    fn test_porch_areas_get_set() {
        let mut porches = PorchAreas::default();
        porches.set(PorchType::ThreeSeason, 120.0);
        assert_eq!(porches.get(PorchType::ThreeSeason), 120.0);
        assert_eq!(porches.active(), vec![PorchType::ThreeSeason]);
    }
}
