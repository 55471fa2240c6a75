//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::client::ServiceKey;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub services: ServicesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend service endpoints and request limits
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServicesConfig {
    #[serde(default = "default_room_url")]
    pub room_url: String,

    #[serde(default = "default_reservation_url")]
    pub reservation_url: String,

    #[serde(default = "default_guest_url")]
    pub guest_url: String,

    #[serde(default = "default_billing_url")]
    pub billing_url: String,

    /// Per-request timeout; expiry is reported as a network fault
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Upper bound on concurrent enrichment lookups per listing
    #[serde(default = "default_max_concurrent_enrichment")]
    pub max_concurrent_enrichment: usize,
}

fn default_room_url() -> String {
    "http://localhost:8001/graphql".to_string()
}

fn default_reservation_url() -> String {
    "http://localhost:8002/graphql".to_string()
}

fn default_guest_url() -> String {
    "http://localhost:8003/graphql".to_string()
}

fn default_billing_url() -> String {
    "http://localhost:8004/graphql".to_string()
}

fn default_request_timeout() -> u64 {
    10_000 // 10 seconds
}

fn default_max_concurrent_enrichment() -> usize {
    8
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            room_url: default_room_url(),
            reservation_url: default_reservation_url(),
            guest_url: default_guest_url(),
            billing_url: default_billing_url(),
            request_timeout_ms: default_request_timeout(),
            max_concurrent_enrichment: default_max_concurrent_enrichment(),
        }
    }
}

impl ServicesConfig {
    /// Endpoint URL for a service
    pub fn endpoint(&self, service: ServiceKey) -> &str {
        match service {
            ServiceKey::Room => &self.room_url,
            ServiceKey::Reservation => &self.reservation_url,
            ServiceKey::Guest => &self.guest_url,
            ServiceKey::Billing => &self.billing_url,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("frontdesk").join("config.toml")),
            Some(PathBuf::from("/etc/frontdesk/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// Unparseable numeric values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Service endpoints
        if let Some(url) = lookup("FRONTDESK_ROOM_URL") {
            self.services.room_url = url;
        }
        if let Some(url) = lookup("FRONTDESK_RESERVATION_URL") {
            self.services.reservation_url = url;
        }
        if let Some(url) = lookup("FRONTDESK_GUEST_URL") {
            self.services.guest_url = url;
        }
        if let Some(url) = lookup("FRONTDESK_BILLING_URL") {
            self.services.billing_url = url;
        }
        if let Some(timeout) = lookup("FRONTDESK_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.services.request_timeout_ms = ms;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("FRONTDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("FRONTDESK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Frontdesk Configuration
#
# Environment variables override these settings:
# - FRONTDESK_ROOM_URL
# - FRONTDESK_RESERVATION_URL
# - FRONTDESK_GUEST_URL
# - FRONTDESK_BILLING_URL
# - FRONTDESK_TIMEOUT_MS
# - FRONTDESK_LOG_LEVEL
# - FRONTDESK_LOG_FORMAT

[services]
# GraphQL endpoint of each backend service
room_url = "http://localhost:8001/graphql"
reservation_url = "http://localhost:8002/graphql"
guest_url = "http://localhost:8003/graphql"
billing_url = "http://localhost:8004/graphql"

# Per-request timeout (ms)
request_timeout_ms = 10000

# Concurrent reservation lookups when enriching a bill listing
max_concurrent_enrichment = 8

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_template_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.services, ServicesConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[services]\nbilling_url = \"http://billing.internal/graphql\"\nrequest_timeout_ms = 2500"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.services.billing_url, "http://billing.internal/graphql");
        assert_eq!(config.services.request_timeout_ms, 2500);
        assert_eq!(config.services.room_url, "http://localhost:8001/graphql");
        assert_eq!(config.services.max_concurrent_enrichment, 8);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[services\nroom_url = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("FRONTDESK_GUEST_URL", "http://guests:9000/graphql"),
            ("FRONTDESK_TIMEOUT_MS", "1500"),
            ("FRONTDESK_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.services.guest_url, "http://guests:9000/graphql");
        assert_eq!(config.services.endpoint(ServiceKey::Guest), "http://guests:9000/graphql");
        assert_eq!(config.services.request_timeout_ms, 1500);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_bad_timeout_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "FRONTDESK_TIMEOUT_MS").then(|| "soon".to_string()));
        assert_eq!(config.services.request_timeout_ms, 10_000);
    }
}
