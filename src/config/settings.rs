//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default Green-API host
pub const DEFAULT_BASE_URL: &str = "https://api.green-api.com";

/// Domain tag appended to raw phone numbers
pub const DEFAULT_CHAT_ID_SUFFIX: &str = "@c.us";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Green-API upstream configuration
    pub green_api: GreenApiConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Green-API upstream configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenApiConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds; `None` keeps the client default
    pub timeout: Option<u64>,
    /// Suffix appended to raw recipient numbers
    pub chat_id_suffix: String,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for GreenApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            chat_id_suffix: DEFAULT_CHAT_ID_SUFFIX.to_string(),
        }
    }
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let timeout = match std::env::var("GREEN_API_TIMEOUT") {
            Ok(value) if !value.trim().is_empty() => Some(
                value
                    .trim()
                    .parse()
                    .context("Invalid timeout value")?,
            ),
            _ => None,
        };

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "127.0.0.1"),
                port: get_env_or_default("SERVER_PORT", "8082")
                    .parse()
                    .context("Invalid port number")?,
            },
            green_api: GreenApiConfig {
                base_url: get_env_or_default("GREEN_API_BASE_URL", DEFAULT_BASE_URL)
                    .trim_end_matches('/')
                    .to_string(),
                timeout,
                chat_id_suffix: get_env_or_default("CHAT_ID_SUFFIX", DEFAULT_CHAT_ID_SUFFIX),
            },
            security: SecurityConfig {
                allowed_origins: get_env_or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
                cors_enabled: get_env_or_default("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if !self.green_api.base_url.starts_with("http") {
            anyhow::bail!("Invalid Green-API base URL format, should start with 'http'");
        }

        if self.green_api.timeout == Some(0) {
            anyhow::bail!("Timeout value cannot be 0");
        }

        if !self.green_api.chat_id_suffix.starts_with('@') {
            anyhow::bail!(
                "Invalid chat id suffix: {}, should start with '@'",
                self.green_api.chat_id_suffix
            );
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Listen address in `host:port` form
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
