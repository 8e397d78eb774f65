//! GET, POST          /api/unit/
//! GET, PUT, DELETE   /api/unit/:unit_uuid/

use std::sync::Arc;

use axum::extract::Path;
use axum::Extension;
use catalog_core::payload::{NewUnit, Payload, UnitPatch};
use catalog_core::types::EntityKind;
use catalog_core::CatalogService;

use super::{created, deleted, updated};
use crate::envelope::{Envelope, JsonBody};
use crate::error::AppError;

const KIND: EntityKind = EntityKind::Unit;

pub async fn list(
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Envelope, AppError> {
    let units = service.list_units().await?;
    Envelope::data(KIND.envelope_key(), &units)
}

pub async fn create(
    Extension(service): Extension<Arc<CatalogService>>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let unit = service.create_unit(NewUnit::from_json(body)?).await?;
    Ok(Envelope::data(KIND.envelope_key(), &unit)?.with_message(created(KIND)))
}

pub async fn retrieve(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    let unit = service.get_unit(KIND.parse_id(&raw_id)?).await?;
    Envelope::data(KIND.envelope_key(), &unit)
}

pub async fn update(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let id = KIND.parse_id(&raw_id)?;
    let unit = service
        .update_unit(id, UnitPatch::from_json(body)?)
        .await?;
    Ok(Envelope::data(KIND.envelope_key(), &unit)?.with_message(updated(KIND)))
}

/// Fails with an in-use error while any product still references the unit.
pub async fn destroy(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    service.delete_unit(KIND.parse_id(&raw_id)?).await?;
    Ok(Envelope::message(deleted(KIND)))
}
