//! Postgres implementations of the catalog store ports.
//!
//! All SQL is runtime-checked (`sqlx::query`, not `sqlx::query!`) so building
//! does not require a live database.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use catalog_core::error::{CatalogError, Result};
use catalog_core::ports::{EntityStore, ProductStore, Stores};
use catalog_core::types::{Product, ProductFilter};

use crate::config::DatabaseConfig;
use crate::table::{
    column_list, delete_sql, insert_sql, select_all_sql, select_one_sql, update_sql, PgTable,
};

fn db_err(e: sqlx::Error) -> CatalogError {
    CatalogError::Internal(anyhow!(e))
}

/// Escape LIKE metacharacters so the query matches literally.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Postgres-backed catalog. Cloning shares the pool.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        info!("Connecting to database: {}", config.masked_url());

        let mut pool_options = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connection_timeout);

        if let Some(idle_timeout) = config.idle_timeout {
            pool_options = pool_options.idle_timeout(idle_timeout);
        }

        if let Some(max_lifetime) = config.max_lifetime {
            pool_options = pool_options.max_lifetime(max_lifetime);
        }

        let pool = pool_options
            .connect(&config.database_url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                e
            })?;

        info!("Database connection pool created successfully");
        Ok(Self { pool })
    }

    /// Apply the bundled migrations.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn stores(&self) -> Stores {
        let this = Arc::new(self.clone());
        Stores {
            categories: this.clone(),
            subcategories: this.clone(),
            sub_of_subs: this.clone(),
            units: this.clone(),
            products: this.clone(),
            banners: this,
        }
    }
}

#[async_trait]
impl<E: PgTable> EntityStore<E> for PgCatalog {
    async fn list(&self) -> Result<Vec<E>> {
        let sql = select_all_sql::<E>();
        sqlx::query_as::<_, E>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn get(&self, id: Uuid) -> Result<Option<E>> {
        let sql = select_one_sql::<E>();
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn insert(&self, entity: &E) -> Result<()> {
        let sql = insert_sql::<E>();
        entity
            .bind_columns(sqlx::query(&sql))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<bool> {
        let sql = update_sql::<E>();
        let result = entity
            .bind_columns(sqlx::query(&sql))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    /// Children are detached by the `ON DELETE SET NULL` foreign keys.
    async fn delete(&self, id: Uuid) -> Result<bool> {
        let sql = delete_sql::<E>();
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ProductStore for PgCatalog {
    async fn filter_products(&self, filter: ProductFilter) -> Result<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM product WHERE {} = $1 ORDER BY seq",
            column_list(Product::COLUMNS, None),
            filter.column()
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(filter.id())
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM product p
            LEFT JOIN category c ON c.uuid = p.category
            WHERE p.name ILIKE $1
               OR p.description ILIKE $1
               OR c.name ILIKE $1
               OR EXISTS (
                    SELECT 1 FROM sub_category s
                    WHERE s.category = p.category
                      AND (s.name ILIKE $1
                           OR EXISTS (
                                SELECT 1 FROM sub_of_sub ss
                                WHERE ss.sub_category = s.uuid
                                  AND ss.name ILIKE $1))
               )
            ORDER BY p.seq
            "#,
            column_list(Product::COLUMNS, Some("p"))
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("teak"), "%teak%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
