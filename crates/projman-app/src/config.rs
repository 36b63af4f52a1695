//! Application configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the application can start with
//! zero configuration.

use std::path::PathBuf;

use projman_store::database::DEFAULT_DB_FILE;

/// Runtime configuration for the application core.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Filesystem path of the SQLite database.
    /// Env: `PROJMAN_DB`
    /// Default: `./projman.db` (next to the running application)
    pub database_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("PROJMAN_DB") {
            if path.is_empty() {
                tracing::warn!("PROJMAN_DB is empty, using default database path");
            } else {
                config.database_path = PathBuf::from(path);
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}
