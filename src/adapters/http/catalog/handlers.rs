//! HTTP handlers for the catalog endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::domain::catalog::CriterionCatalog;

use super::dto::CatalogResponse;

/// GET /api/catalog - All criteria in button order
pub async fn get_catalog(State(catalog): State<Arc<CriterionCatalog>>) -> Json<CatalogResponse> {
    Json(CatalogResponse::from(catalog.as_ref()))
}
