//! GET, POST          /api/category/
//! GET, PUT, DELETE   /api/category/:category_uuid/

use std::sync::Arc;

use axum::extract::Path;
use axum::Extension;
use catalog_core::payload::{CategoryPatch, NewCategory, Payload};
use catalog_core::types::EntityKind;
use catalog_core::CatalogService;

use super::{created, deleted, updated};
use crate::envelope::{Envelope, JsonBody};
use crate::error::AppError;

const KIND: EntityKind = EntityKind::Category;

pub async fn list(
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Envelope, AppError> {
    let categories = service.list_categories().await?;
    Envelope::data(KIND.envelope_key(), &categories)
}

pub async fn create(
    Extension(service): Extension<Arc<CatalogService>>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let category = service.create_category(NewCategory::from_json(body)?).await?;
    Ok(Envelope::data(KIND.envelope_key(), &category)?.with_message(created(KIND)))
}

pub async fn retrieve(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    let category = service.get_category(KIND.parse_id(&raw_id)?).await?;
    Envelope::data(KIND.envelope_key(), &category)
}

pub async fn update(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let id = KIND.parse_id(&raw_id)?;
    let category = service
        .update_category(id, CategoryPatch::from_json(body)?)
        .await?;
    Ok(Envelope::data(KIND.envelope_key(), &category)?.with_message(updated(KIND)))
}

pub async fn destroy(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    service.delete_category(KIND.parse_id(&raw_id)?).await?;
    Ok(Envelope::message(deleted(KIND)))
}
