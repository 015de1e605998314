//! Server configuration, loaded from a TOML file.
//!
//! ```toml
//! env = "development"
//! db_path = "storage/movies.db"
//!
//! [http]
//! host = "127.0.0.1"
//! port = 8082
//!
//! [logging]
//! level = "info"
//! file = "logs/app.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ServerError;

/// Default number of movies returned by the list route.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Hard cap on the list route's `limit`.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Log file used when `logging.file` is not set.
pub const DEFAULT_LOG_FILE: &str = "logs/app.log";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Deployment name; `development` also logs to stderr.
    pub env: String,
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Per-request deadline handed to the store.
    pub request_timeout_ms: u64,
    pub max_page_size: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8082,
            request_timeout_ms: 5000,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl HttpConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter, overridden by `RUST_LOG`.
    pub level: String,
    /// Log file, appended to in every environment.
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("storage/movies.db")
}

impl Config {
    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        if !path.exists() {
            return Err(ServerError::config(format!(
                "configuration file {} does not exist",
                path.display()
            )));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ServerError> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| ServerError::config(format!("invalid configuration: {e}")))?;
        if config.env.trim().is_empty() {
            return Err(ServerError::config("`env` must not be empty"));
        }
        if config.http.max_page_size == 0 {
            return Err(ServerError::config("`http.max_page_size` must be positive"));
        }
        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.env == "development"
    }
}
