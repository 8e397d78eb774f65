//! GET, POST          /api/product/                          (`?search=` filters the list)
//! GET, PUT, DELETE   /api/product/:product_uuid/
//! GET                /api/product/by-ancestor/:identifier/:uuid/

use std::sync::Arc;

use axum::extract::Path;
use axum::Extension;
use catalog_core::payload::{NewProduct, Payload, ProductPatch};
use catalog_core::types::{AncestorKind, EntityKind};
use catalog_core::CatalogService;
use serde::Deserialize;

use super::{created, deleted, updated};
use crate::envelope::{Envelope, JsonBody, QueryParams};
use crate::error::AppError;

const KIND: EntityKind = EntityKind::Product;

/// Key for the combined list/search response.
const LIST_KEY: &str = "products";

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Lists every product, or the search result when `search` is non-empty.
pub async fn list(
    Extension(service): Extension<Arc<CatalogService>>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Envelope, AppError> {
    let products = service.list_products(params.search.as_deref()).await?;
    Envelope::data(LIST_KEY, &products)
}

pub async fn create(
    Extension(service): Extension<Arc<CatalogService>>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let product = service.create_product(NewProduct::from_json(body)?).await?;
    Ok(Envelope::data(KIND.envelope_key(), &product)?.with_message(created(KIND)))
}

pub async fn retrieve(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    let product = service.get_product(KIND.parse_id(&raw_id)?).await?;
    Envelope::data(KIND.envelope_key(), &product)
}

pub async fn update(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let id = KIND.parse_id(&raw_id)?;
    let product = service
        .update_product(id, ProductPatch::from_json(body)?)
        .await?;
    Ok(Envelope::data(KIND.envelope_key(), &product)?.with_message(updated(KIND)))
}

pub async fn destroy(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    service.delete_product(KIND.parse_id(&raw_id)?).await?;
    Ok(Envelope::message(deleted(KIND)))
}

/// Products tagged directly with the given category, sub category or sub of
/// sub category. Descendants of the ancestor are not included.
pub async fn by_ancestor(
    Extension(service): Extension<Arc<CatalogService>>,
    Path((identifier, raw_id)): Path<(String, String)>,
) -> Result<Envelope, AppError> {
    let ancestor = AncestorKind::from_selector(&identifier)?;
    let id = ancestor.entity_kind().parse_id(&raw_id)?;
    let products = service.list_by_ancestor(ancestor, id).await?;
    Envelope::data(KIND.envelope_key(), &products)
}
