//! Incremental Resolve Routes
//!
//! One endpoint per dependent group of form fields. The form posts the group
//! whenever one of its fields changes and renders the repaired values and
//! warnings it gets back.

use axum::{extract::State, Json};
use constraint_engine::resolvers::{
    resolve_basement_baths, resolve_basement_group, resolve_floor_split, resolve_garage_area,
    resolve_garage_group, resolve_porch_selection, resolve_subclass, FloorSplit,
};
use constraint_engine::{PorchAreas, Warning};
use feature_engine::total_porch_sf;
use property_catalog::{
    entries_for, Attribute, CatalogContext, CategoryEntry, HouseStyle, PorchType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SubclassRequest {
    pub house_style: String,
    pub ms_sub_class: u16,
}

#[derive(Debug, Serialize)]
pub struct SubclassResponse {
    pub ms_sub_class: u16,
    /// Subclasses selectable for the style
    pub options: Vec<CategoryEntry>,
    pub warnings: Vec<Warning>,
}

/// Keep the subclass compatible with the chosen style
pub async fn subclass(Json(req): Json<SubclassRequest>) -> Json<SubclassResponse> {
    let resolution = resolve_subclass(&req.house_style, req.ms_sub_class);
    let context = CatalogContext {
        house_style: req.house_style.parse().ok(),
    };

    Json(SubclassResponse {
        ms_sub_class: resolution.value,
        options: entries_for(Attribute::MsSubClass, &context),
        warnings: resolution.warnings,
    })
}

#[derive(Debug, Deserialize)]
pub struct BasementRequest {
    pub total_bsmt_sf: f64,
    pub bsmt_qual: String,
    pub bsmt_fin_type1: String,
    pub bsmt_exposure: String,
    #[serde(default)]
    pub bsmt_full_bath: u8,
    #[serde(default)]
    pub bsmt_half_bath: u8,
}

#[derive(Debug, Serialize)]
pub struct BasementResponse {
    pub bsmt_qual: &'static str,
    pub bsmt_fin_type1: &'static str,
    pub bsmt_exposure: &'static str,
    pub bsmt_full_bath: u8,
    pub bsmt_half_bath: u8,
    pub warnings: Vec<Warning>,
}

/// Basement quality, finish, exposure and baths against total basement area
pub async fn basement(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BasementRequest>,
) -> Result<Json<BasementResponse>, ApiError> {
    let validator = state.pipeline.engine().validator();
    validator.validate_range(
        "TotalBsmtSF",
        req.total_bsmt_sf,
        validator.config().basement_area_range,
    )?;

    let mut warnings = Vec::new();
    let (bsmt_qual, bsmt_fin_type1, bsmt_exposure) = resolve_basement_group(
        req.total_bsmt_sf,
        &req.bsmt_qual,
        &req.bsmt_fin_type1,
        &req.bsmt_exposure,
    )?
    .drain_into(&mut warnings);
    let (bsmt_full_bath, bsmt_half_bath) =
        resolve_basement_baths(req.total_bsmt_sf, req.bsmt_full_bath, req.bsmt_half_bath)
            .drain_into(&mut warnings);

    Ok(Json(BasementResponse {
        bsmt_qual,
        bsmt_fin_type1,
        bsmt_exposure,
        bsmt_full_bath,
        bsmt_half_bath,
        warnings,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GarageRequest {
    pub garage_finish: String,
    pub garage_cars: i32,
    #[serde(default)]
    pub garage_area: f64,
}

#[derive(Debug, Serialize)]
pub struct GarageResponse {
    pub garage_finish: &'static str,
    pub garage_cars: u8,
    pub garage_area: f64,
    pub warnings: Vec<Warning>,
}

/// Garage capacity and area against the garage finish
pub async fn garage(Json(req): Json<GarageRequest>) -> Result<Json<GarageResponse>, ApiError> {
    let garage_finish = Attribute::GarageFinish.validate(&req.garage_finish)?;

    let mut warnings = Vec::new();
    let garage_cars =
        resolve_garage_group(garage_finish, req.garage_cars)?.drain_into(&mut warnings);
    let garage_area =
        resolve_garage_area(garage_finish, req.garage_area)?.drain_into(&mut warnings);

    Ok(Json(GarageResponse {
        garage_finish,
        garage_cars,
        garage_area,
        warnings,
    }))
}

#[derive(Debug, Deserialize)]
pub struct FloorsRequest {
    pub house_style: String,
    pub ms_sub_class: u16,
    pub gr_liv_area: f64,
    #[serde(default)]
    pub first_flr_sf: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FloorsResponse {
    pub ms_sub_class: u16,
    #[serde(flatten)]
    pub split: FloorSplit,
    pub warnings: Vec<Warning>,
}

/// Split living area over the floors the style and subclass allow
pub async fn floors(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FloorsRequest>,
) -> Result<Json<FloorsResponse>, ApiError> {
    let style: HouseStyle = req.house_style.parse()?;
    let validator = state.pipeline.engine().validator();
    validator.validate_range("GrLivArea", req.gr_liv_area, validator.config().gr_liv_area_range)?;

    let mut warnings = Vec::new();
    let ms_sub_class =
        resolve_subclass(&req.house_style, req.ms_sub_class).drain_into(&mut warnings);
    let split = resolve_floor_split(style, ms_sub_class, req.gr_liv_area, req.first_flr_sf)
        .drain_into(&mut warnings);

    Ok(Json(FloorsResponse {
        ms_sub_class,
        split,
        warnings,
    }))
}

#[derive(Debug, Deserialize)]
pub struct PorchesRequest {
    pub porch_types: Vec<String>,
    #[serde(default)]
    pub porch_areas: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct PorchesResponse {
    pub areas: PorchAreas,
    pub total_porch_sf: f64,
    pub warnings: Vec<Warning>,
}

/// Cap the porch selection and zero unselected areas
pub async fn porches(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PorchesRequest>,
) -> Result<Json<PorchesResponse>, ApiError> {
    let validator = state.pipeline.engine().validator();
    let selected = req
        .porch_types
        .iter()
        .map(|code| code.parse::<PorchType>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut areas = PorchAreas::default();
    for (code, area) in &req.porch_areas {
        validator.validate_range("PorchArea", *area, validator.config().porch_area_range)?;
        areas.set(code.parse()?, area.round());
    }

    let resolution = resolve_porch_selection(&selected, &areas);
    Ok(Json(PorchesResponse {
        total_porch_sf: total_porch_sf(&resolution.value),
        areas: resolution.value,
        warnings: resolution.warnings,
    }))
}
