//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ClientConfig;
use crate::routes::DEFAULT_BACKEND_URL;
use crate::schedule::{ClinicTimeZone, TimeSlot};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Clinic backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Bearer token of the signed-in user
    pub token: Option<String>,
}

/// Scheduling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// How wall-clock appointment times map to instants
    #[serde(default)]
    pub timezone: ClinicTimeZone,

    /// Selectable time slots
    #[serde(default = "TimeSlot::defaults")]
    pub slots: Vec<TimeSlot>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: ClinicTimeZone::default(),
            slots: TimeSlot::defaults(),
        }
    }
}

/// Query cache configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
    /// Seconds before cached data goes stale on its own (unset: never)
    pub stale_after_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
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

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Standard config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("dentbook").join("config.toml")),
            Some(PathBuf::from("/etc/dentbook/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first existing file in `paths`, with environment overrides.
    ///
    /// A file that exists but does not load is an error, not a reason to
    /// keep searching.
    pub fn load_first(paths: &[PathBuf]) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Ok(Some((path.clone(), Self::load_with_env(path)?))),
            None => Ok(None),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::load_first(&Self::default_paths())? {
            Some((_, config)) => Ok(config),
            None => Self::from_env(),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DENTBOOK_BACKEND_URL") {
            self.backend.url = url;
        }

        if let Some(token) = lookup("DENTBOOK_TOKEN") {
            self.session.token = Some(token);
        }

        if let Some(zone) = lookup("DENTBOOK_TIMEZONE") {
            self.schedule.timezone = zone
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("DENTBOOK_TIMEZONE: {}", e)))?;
        }

        if let Some(level) = lookup("DENTBOOK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("DENTBOOK_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.url.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.url must not be empty".to_string()));
        }
        if self.backend.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "backend.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.schedule.slots.is_empty() {
            return Err(ConfigError::Invalid(
                "schedule.slots must list at least one slot".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP client settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend.url.clone(),
            request_timeout_ms: self.backend.request_timeout_secs.saturating_mul(1000),
        }
    }

    /// Query cache settings
    pub fn cache_config(&self) -> crate::cache::CacheConfig {
        crate::cache::CacheConfig {
            stale_after: self.cache.stale_after_secs.map(Duration::from_secs),
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

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Dentbook Configuration
#
# Environment variables override these settings:
# - DENTBOOK_BACKEND_URL
# - DENTBOOK_TOKEN
# - DENTBOOK_TIMEZONE
# - DENTBOOK_LOG_LEVEL
# - DENTBOOK_LOG_FORMAT

[backend]
# Clinic backend URL (the API lives under /api/v1)
url = "https://project-s-backend-cyan.vercel.app"

# Request timeout in seconds
request_timeout_secs = 10

[session]
# Bearer token of the signed-in user
# token = ""

[schedule]
# Timezone for appointment times: local, utc or an offset like +07:00
timezone = "local"

# Selectable time slots
slots = [
  "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30",
  "13:00", "13:30", "14:00", "14:30", "15:00", "15:30", "16:00", "16:30",
]

[cache]
# Seconds before cached bookings are re-fetched on their own
# stale_after_secs = 300

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
