//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::database::DatabaseConfig;
use uuid::Uuid;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub default_author: Option<Uuid>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            default_author: Self::parse_default_author(env::var("DEFAULT_AUTHOR_ID").ok()),
        }
    }

    fn parse_default_author(raw: Option<String>) -> Option<Uuid> {
        let raw = raw?;
        match Uuid::parse_str(raw.trim()) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Ignoring malformed DEFAULT_AUTHOR_ID '{}': {}", raw, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_author() {
        let id = Uuid::new_v4();
        assert_eq!(AppConfig::parse_default_author(Some(id.to_string())), Some(id));
        assert_eq!(AppConfig::parse_default_author(Some("nope".to_string())), None);
        assert_eq!(AppConfig::parse_default_author(None), None);
    }
}
