use std::time::Duration;

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connection_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl DatabaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            connection_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)), // 10 minutes
            max_lifetime: Some(Duration::from_secs(1800)), // 30 minutes
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// The URL with any password replaced, safe to log.
    pub fn masked_url(&self) -> String {
        mask_database_url(&self.database_url)
    }
}

fn mask_database_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let mut masked = parsed.clone();
            if parsed.password().is_some() {
                let _ = masked.set_password(Some("***"));
            }
            masked.to_string()
        }
        Err(_) => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_masked() {
        let config = DatabaseConfig::new("postgres://shop:s3cret@db:5432/catalog");
        assert_eq!(config.masked_url(), "postgres://shop:***@db:5432/catalog");
    }

    #[test]
    fn url_without_password_is_kept() {
        let config = DatabaseConfig::new("postgres://localhost/catalog");
        assert_eq!(config.masked_url(), "postgres://localhost/catalog");
    }

    #[test]
    fn unparseable_url_is_hidden() {
        assert_eq!(DatabaseConfig::new("not a url").masked_url(), "***");
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = DatabaseConfig::new("postgres://localhost/catalog")
            .with_max_connections(4)
            .with_connection_timeout(Duration::from_secs(5));
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(600)));
    }
}
