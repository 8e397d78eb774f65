//! GET, POST          /api/banner/
//! GET, PUT, DELETE   /api/banner/:banner_uuid/

use std::sync::Arc;

use axum::extract::Path;
use axum::Extension;
use catalog_core::payload::{BannerPatch, NewBanner, Payload};
use catalog_core::types::EntityKind;
use catalog_core::CatalogService;

use super::{created, deleted, updated};
use crate::envelope::{Envelope, JsonBody};
use crate::error::AppError;

const KIND: EntityKind = EntityKind::Banner;

pub async fn list(
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Envelope, AppError> {
    let banners = service.list_banners().await?;
    Envelope::data(KIND.envelope_key(), &banners)
}

pub async fn create(
    Extension(service): Extension<Arc<CatalogService>>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let banner = service.create_banner(NewBanner::from_json(body)?).await?;
    Ok(Envelope::data(KIND.envelope_key(), &banner)?.with_message(created(KIND)))
}

pub async fn retrieve(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    let banner = service.get_banner(KIND.parse_id(&raw_id)?).await?;
    Envelope::data(KIND.envelope_key(), &banner)
}

pub async fn update(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let id = KIND.parse_id(&raw_id)?;
    let banner = service
        .update_banner(id, BannerPatch::from_json(body)?)
        .await?;
    Ok(Envelope::data(KIND.envelope_key(), &banner)?.with_message(updated(KIND)))
}

pub async fn destroy(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope, AppError> {
    service.delete_banner(KIND.parse_id(&raw_id)?).await?;
    Ok(Envelope::message(deleted(KIND)))
}
