//! GET /api/search/?search=<q>

use std::sync::Arc;

use axum::Extension;
use catalog_core::types::EntityKind;
use catalog_core::CatalogService;

use super::product::SearchParams;
use crate::envelope::{Envelope, QueryParams};
use crate::error::AppError;

/// Unlike the product list, an empty or missing query is an error here.
pub async fn search(
    Extension(service): Extension<Arc<CatalogService>>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Envelope, AppError> {
    let products = service.search_products(params.search.as_deref()).await?;
    Envelope::data(EntityKind::Product.envelope_key(), &products)
}
