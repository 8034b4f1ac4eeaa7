//! HTTP adapter exposing the criterion catalog.

mod dto;
mod handlers;
mod routes;

pub use dto::{CatalogResponse, CriterionResponse};
pub use routes::catalog_routes;
