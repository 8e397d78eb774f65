//! GET, POST          /api/sub-of-sub/
//! GET, PUT, DELETE   /api/sub-of-sub/:subs_uuid/

use std::sync::Arc;

use axum::extract::Path;
use axum::Extension;
use catalog_core::payload::{NewSubofSub, Payload, SubofSubPatch};
use catalog_core::types::EntityKind;
use catalog_core::CatalogService;

use super::{created, deleted, updated};
use crate::envelope::{Envelope, JsonBody};
use crate::error::AppError;

const KIND: EntityKind = EntityKind::SubofSub;

pub async fn list(
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Envelope, AppError> {
    let sub_of_subs = service.list_sub_of_subs().await?;
    Envelope::data(KIND.envelope_key(), &sub_of_subs)
}

pub async fn create(
    Extension(service): Extension<Arc<CatalogService>>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let sub_of_sub = service.create_sub_of_sub(NewSubofSub::from_json(body)?).await?;
    Ok(Envelope::data(KIND.envelope_key(), &sub_of_sub)?.with_message(created(KIND)))
}

pub async fn retrieve(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    let sub_of_sub = service.get_sub_of_sub(KIND.parse_id(&raw_id)?).await?;
    Envelope::data(KIND.envelope_key(), &sub_of_sub)
}

pub async fn update(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let id = KIND.parse_id(&raw_id)?;
    let sub_of_sub = service
        .update_sub_of_sub(id, SubofSubPatch::from_json(body)?)
        .await?;
    Ok(Envelope::data(KIND.envelope_key(), &sub_of_sub)?.with_message(updated(KIND)))
}

pub async fn destroy(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    service.delete_sub_of_sub(KIND.parse_id(&raw_id)?).await?;
    Ok(Envelope::message(deleted(KIND)))
}
