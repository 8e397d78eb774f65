//! catalog_server: REST server for the product catalog.
//!
//! Configuration comes from the environment (and `.env` if present); see
//! `catalog_server::config` for the variables.

use std::sync::Arc;

use catalog_core::{CatalogService, MemoryCatalog};
use catalog_postgres::PgCatalog;
use catalog_server::config::{ServerConfig, StoreBackend};
use catalog_server::router::build_router;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_server=debug,catalog_core=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let stores = match &config.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            MemoryCatalog::new().stores()
        }
        StoreBackend::Postgres(db) => {
            let catalog = PgCatalog::connect(db).await?;
            if config.run_migrations {
                catalog.migrate().await?;
            }
            catalog.stores()
        }
    };

    let service = Arc::new(CatalogService::new(stores));
    let app = build_router(service);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("catalog_server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("catalog_server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
