//! Catalog REST server: JSON envelope, error mapping and axum routes over
//! `CatalogService`.

pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod router;
