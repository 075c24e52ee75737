//! Configuration management
//!
//! This module handles loading configuration for Courseboard.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults. The database
//! URL and access key have no defaults: whether their absence is fatal is
//! decided by the caller (see [`crate::db::SupabaseClient::connect`] and
//! [`crate::db::DataSource::from_config`]).

use serde::{Deserialize, Serialize};

/// Environment variable holding the database endpoint URL
pub const ENV_DATABASE_URL: &str = "SUPABASE_URL";
/// Environment variable holding the public access key
pub const ENV_DATABASE_KEY: &str = "SUPABASE_ANON_KEY";
/// Fallback names used by the site build's `.env`
pub const ENV_DATABASE_URL_FALLBACK: &str = "VITE_SUPABASE_URL";
pub const ENV_DATABASE_KEY_FALLBACK: &str = "VITE_SUPABASE_ANON_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Connection settings for the hosted database REST endpoint
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    #[serde(default)]
    pub url: Option<String>,
    /// Public (anon) access key
    #[serde(default)]
    pub anon_key: Option<String>,
    /// Postgres schema exposed through the REST endpoint
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            schema: default_schema(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Validated connection credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Project URL without a trailing slash
    pub url: String,
    pub anon_key: String,
}

/// Placeholder printed instead of the access key
const REDACTED: &str = "[redacted]";

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &self.anon_key.as_ref().map(|_| REDACTED))
            .field("schema", &self.schema)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("anon_key", &REDACTED)
            .finish()
    }
}

impl DatabaseConfig {
    /// Create a configuration with the given credentials and default settings
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            anon_key: Some(anon_key.into()),
            ..Self::default()
        }
    }

    /// Check whether both credentials are present and non-blank.
    ///
    /// This does not validate the URL; use [`DatabaseConfig::credentials`]
    /// for that.
    pub fn is_configured(&self) -> bool {
        non_blank(&self.url).is_some() && non_blank(&self.anon_key).is_some()
    }

    /// Validate and return the connection credentials
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let url = non_blank(&self.url).ok_or(ConfigError::MissingCredential(ENV_DATABASE_URL))?;
        let anon_key =
            non_blank(&self.anon_key).ok_or(ConfigError::MissingCredential(ENV_DATABASE_KEY))?;

        let parsed = reqwest::Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url.to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Credentials {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Error type for configuration loading and validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
    #[error("Missing database credential: {0} is not set")]
    MissingCredential(&'static str),
    #[error("Invalid database URL '{url}': {message}")]
    InvalidUrl {
        url: String,
        message: String,
    },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables:
    /// - SUPABASE_URL (or VITE_SUPABASE_URL)
    /// - SUPABASE_ANON_KEY (or VITE_SUPABASE_ANON_KEY)
    /// - COURSEBOARD_DATABASE_SCHEMA
    /// - COURSEBOARD_DATABASE_TIMEOUT_SECONDS
    pub fn load_with_env(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Configuration built from environment variables only
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "database.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.database.schema.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.schema must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Some(url) = env_value(ENV_DATABASE_URL).or_else(|| env_value(ENV_DATABASE_URL_FALLBACK)) {
            self.database.url = Some(url);
        }
        if let Some(key) = env_value(ENV_DATABASE_KEY).or_else(|| env_value(ENV_DATABASE_KEY_FALLBACK)) {
            self.database.anon_key = Some(key);
        }
        if let Some(schema) = env_value("COURSEBOARD_DATABASE_SCHEMA") {
            self.database.schema = schema;
        }
        if let Some(timeout) = env_value("COURSEBOARD_DATABASE_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.database.timeout_seconds = timeout;
            }
        }
    }
}

/// Read an environment variable, treating blank values as unset
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for config tests that modify environment variables.
#[cfg(test)]
pub(crate) static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
pub(crate) const ENV_VARS: [&str; 6] = [
    ENV_DATABASE_URL,
    ENV_DATABASE_KEY,
    ENV_DATABASE_URL_FALLBACK,
    ENV_DATABASE_KEY_FALLBACK,
    "COURSEBOARD_DATABASE_SCHEMA",
    "COURSEBOARD_DATABASE_TIMEOUT_SECONDS",
];

#[cfg(test)]
pub(crate) fn clear_env() {
    for name in ENV_VARS {
        std::env::remove_var(name);
    }
}
