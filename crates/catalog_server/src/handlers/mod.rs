//! Route handlers, one module per resource.
//!
//! Handlers only extract, decode and wrap: path ids are parsed, bodies are
//! validated into payloads, and everything else is delegated to
//! `CatalogService`.

pub mod banner;
pub mod category;
pub mod health;
pub mod product;
pub mod search;
pub mod sub_category;
pub mod sub_of_sub;
pub mod unit;

use catalog_core::types::EntityKind;

pub(crate) fn created(kind: EntityKind) -> String {
    format!("{kind} created successfully")
}

pub(crate) fn updated(kind: EntityKind) -> String {
    format!("{kind} updated successfully")
}

pub(crate) fn deleted(kind: EntityKind) -> String {
    format!("{kind} deleted successfully")
}
