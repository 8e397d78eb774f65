//! GET, POST          /api/sub-subcategory/
//! GET, PUT, DELETE   /api/sub-subcategory/:sub_category_uuid/

use std::sync::Arc;

use axum::extract::Path;
use axum::Extension;
use catalog_core::payload::{NewSubcategory, Payload, SubcategoryPatch};
use catalog_core::types::EntityKind;
use catalog_core::CatalogService;

use super::{created, deleted, updated};
use crate::envelope::{Envelope, JsonBody};
use crate::error::AppError;

const KIND: EntityKind = EntityKind::Subcategory;

pub async fn list(
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Envelope, AppError> {
    let subcategories = service.list_subcategories().await?;
    Envelope::data(KIND.envelope_key(), &subcategories)
}

pub async fn create(
    Extension(service): Extension<Arc<CatalogService>>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let subcategory = service.create_subcategory(NewSubcategory::from_json(body)?).await?;
    Ok(Envelope::data(KIND.envelope_key(), &subcategory)?.with_message(created(KIND)))
}

pub async fn retrieve(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    let subcategory = service.get_subcategory(KIND.parse_id(&raw_id)?).await?;
    Envelope::data(KIND.envelope_key(), &subcategory)
}

pub async fn update(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let id = KIND.parse_id(&raw_id)?;
    let subcategory = service
        .update_subcategory(id, SubcategoryPatch::from_json(body)?)
        .await?;
    Ok(Envelope::data(KIND.envelope_key(), &subcategory)?.with_message(updated(KIND)))
}

pub async fn destroy(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    service.delete_subcategory(KIND.parse_id(&raw_id)?).await?;
    Ok(Envelope::message(deleted(KIND)))
}
