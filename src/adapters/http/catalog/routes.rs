//! HTTP routes for the catalog endpoint.

use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::get_catalog;
use crate::domain::catalog::CriterionCatalog;

/// Creates the catalog router, mounted at `/api/catalog`.
pub fn catalog_routes(catalog: Arc<CriterionCatalog>) -> Router {
    Router::new().route("/", get(get_catalog)).with_state(catalog)
}
