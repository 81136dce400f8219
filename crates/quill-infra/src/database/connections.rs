#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn};

#[cfg(feature = "postgres")]
use quill_core::error::RepoError;

/// Configuration for the content database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Owner of the database pool.
///
/// Created once at startup with [`DatabaseConnections::init`] and released
/// with [`DatabaseConnections::close`] during shutdown.
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    pub main: DbConn,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Connect using the given configuration.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, RepoError> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        tracing::info!(
            "Database connected (pool: {})",
            config.max_connections
        );

        Ok(Self { main })
    }

    /// Check that the pool can still reach the server.
    pub async fn ping(&self) -> Result<(), RepoError> {
        self.main
            .ping()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))
    }

    /// Close the pool. Outstanding clones of the connection stop working.
    pub async fn close(&self) -> Result<(), RepoError> {
        self.main
            .close_by_ref()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
