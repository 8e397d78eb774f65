//! Catalog core: entity types, request schemas and payloads, the error
//! taxonomy, storage ports with an in-memory backend, and the catalog service.

pub mod error;
pub mod memory;
pub mod payload;
pub mod ports;
pub mod schema;
pub mod search;
pub mod service;
pub mod types;

pub use error::{CatalogError, FieldErrors, Result};
pub use memory::MemoryCatalog;
pub use payload::{Patch, Payload};
pub use ports::{EntityStore, ProductStore, Stores};
pub use service::CatalogService;
pub use types::{
    AncestorKind, Banner, Category, Entity, EntityKind, Product, ProductFilter, SubofSub,
    Subcategory, Unit,
};
