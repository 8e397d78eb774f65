//! Server configuration, read from the environment.
//!
//!   CATALOG_BIND_ADDR               listen address (default: 0.0.0.0:8000)
//!   CATALOG_STORE                   `memory` or `postgres` (default: postgres when a
//!                                   database URL is set, memory otherwise)
//!   CATALOG_DATABASE_URL            Postgres connection string (falls back to DATABASE_URL)
//!   CATALOG_DB_POOL_SIZE            max pool connections (default: 10)
//!   CATALOG_DB_CONNECT_TIMEOUT_SECS pool acquire timeout (default: 30)
//!   CATALOG_RUN_MIGRATIONS          apply migrations on startup (default: true)

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use catalog_postgres::DatabaseConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },

    #[error("CATALOG_STORE=postgres requires CATALOG_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone)]
pub enum StoreBackend {
    Memory,
    Postgres(DatabaseConfig),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    pub run_migrations: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, "CATALOG_BIND_ADDR", || {
            SocketAddr::from(([0, 0, 0, 0], 8000))
        })?;
        let run_migrations = parse_bool(&lookup, "CATALOG_RUN_MIGRATIONS", true)?;

        let database_url = lookup("CATALOG_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .filter(|url| !url.trim().is_empty());

        let use_postgres = match lookup("CATALOG_STORE").as_deref().map(str::trim) {
            None | Some("") => database_url.is_some(),
            Some(v) if v.eq_ignore_ascii_case("postgres") => true,
            Some(v) if v.eq_ignore_ascii_case("memory") => false,
            Some(v) => {
                return Err(ConfigError::Invalid {
                    var: "CATALOG_STORE",
                    value: v.to_string(),
                })
            }
        };

        let backend = if use_postgres {
            let url = database_url.ok_or(ConfigError::MissingDatabaseUrl)?;
            let pool_size = parse_or(&lookup, "CATALOG_DB_POOL_SIZE", || 10u32)?;
            let timeout = parse_or(&lookup, "CATALOG_DB_CONNECT_TIMEOUT_SECS", || 30u64)?;
            StoreBackend::Postgres(
                DatabaseConfig::new(url)
                    .with_max_connections(pool_size)
                    .with_connection_timeout(Duration::from_secs(timeout)),
            )
        } else {
            StoreBackend::Memory
        };

        Ok(Self {
            bind_addr,
            backend,
            run_migrations,
        })
    }
}

fn parse_or<T, F, D>(lookup: &F, var: &'static str, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
    D: FnOnce() -> T,
{
    match lookup(var) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw })
        }
        _ => Ok(default()),
    }
}

fn parse_bool<F>(lookup: &F, var: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var).as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            var,
            value: other.to_string(),
        }),
    }
}
