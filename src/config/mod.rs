//! Configuration management
//!
//! Settings load from a TOML file (`config.toml` by convention) or
//! from `SENTINEL_*` environment variables, with sensible defaults for
//! local development.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Content API settings
    pub api: ApiConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Page composition settings
    pub presentation: PresentationConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Content API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend REST API
    pub base_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Maximum retry attempts for transient failures
    pub max_retries: u32,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_address: SocketAddr,

    /// Enable permissive CORS headers
    pub enable_cors: bool,

    /// Enable per-request tracing
    pub enable_request_logging: bool,
}

/// Page composition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Sidebar "more stories" count drawn from overflow
    pub more_stories_count: usize,

    /// Floor on how many articles each page fetch requests
    pub min_fetch_count: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("SENTINEL_API_BASE_URL") {
            config.api.base_url = base_url;
        }
        if let Some(timeout) = env_parse::<u64>("SENTINEL_REQUEST_TIMEOUT") {
            config.api.request_timeout_secs = timeout;
        }
        if let Some(retries) = env_parse::<u32>("SENTINEL_MAX_RETRIES") {
            config.api.max_retries = retries;
        }
        if let Some(addr) = env_parse::<SocketAddr>("SENTINEL_BIND_ADDRESS") {
            config.server.bind_address = addr;
        }
        if let Some(count) = env_parse::<usize>("SENTINEL_MORE_STORIES") {
            config.presentation.more_stories_count = count;
        }
        if let Some(count) = env_parse::<usize>("SENTINEL_MIN_FETCH") {
            config.presentation.min_fetch_count = count;
        }
        if let Ok(level) = std::env::var("SENTINEL_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("SENTINEL_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.api.base_url))?;

        if self.api.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.presentation.min_fetch_count == 0 {
            anyhow::bail!("min_fetch_count must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::from("http://localhost:8000/api"),
                request_timeout_secs: 30,
                max_retries: 3,
            },
            server: ServerConfig {
                bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
                enable_cors: true,
                enable_request_logging: true,
            },
            presentation: PresentationConfig {
                more_stories_count: 12,
                min_fetch_count: 24,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse::<T>().ok())
}
