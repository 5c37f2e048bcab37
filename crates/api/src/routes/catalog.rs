//! Catalog Routes

use axum::{
    extract::{Path, Query},
    Json,
};
use property_catalog::{entries_for, Attribute, CatalogContext, CategoryEntry};
use serde::Serialize;

use crate::error::ApiError;

/// Selectable values of one attribute
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub attribute: Attribute,
    pub entries: Vec<CategoryEntry>,
    pub default_code: &'static str,
    /// Code meaning "not present", if the attribute has one
    pub sentinel: Option<&'static str>,
}

/// List attribute names
pub async fn list_attributes() -> Json<Vec<&'static str>> {
    Json(Attribute::ALL.iter().map(Attribute::feature_name).collect())
}

/// Get the entries of an attribute, narrowed by `?house_style=` for subclasses
pub async fn get_attribute(
    Path(name): Path<String>,
    Query(context): Query<CatalogContext>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let attribute: Attribute = name.parse()?;

    Ok(Json(CatalogResponse {
        attribute,
        entries: entries_for(attribute, &context),
        default_code: attribute.default_code(),
        sentinel: attribute.sentinel(),
    }))
}
