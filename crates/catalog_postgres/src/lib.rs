//! PostgreSQL adapter for the catalog store ports.
//!
//! `PgCatalog` wraps a `PgPool` and implements `EntityStore<E>` for every
//! catalog entity plus `ProductStore`. Referential delete rules live in the
//! schema (`migrations/`).

pub mod config;
pub mod store;
pub mod table;

pub use config::DatabaseConfig;
pub use store::PgCatalog;
pub use table::PgTable;
