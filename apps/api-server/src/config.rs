//! Application configuration loaded from environment variables.

use std::env;

use ripple_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Port of the socket.io listener for feed subscribers.
    pub realtime_port: u16,
    pub database: Option<DatabaseConfig>,
    /// Directory that image references resolve against for cleanup.
    pub images_dir: String,
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
            realtime_port: env::var("REALTIME_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8081),
            database,
            images_dir: env::var("IMAGES_DIR").unwrap_or_else(|_| "images".to_string()),
        }
    }
}
