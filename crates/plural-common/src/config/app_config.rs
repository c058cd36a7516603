//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
    pub import: ImportConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Which member store backs the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Relational store (members + messages tables)
    #[default]
    Sqlite,
    /// Flat JSON settings file, read at startup and written at shutdown
    File,
}

/// Application-private storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage root; relative avatar paths resolve against it
    pub data_dir: PathBuf,
    pub backend: StorageBackend,
    pub settings_file: PathBuf,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Remote import configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub pluralkit_url: String,
    pub simplyplural_url: String,
    /// Pause imposed after every avatar download
    pub avatar_delay: Duration,
    pub http_timeout: Duration,
}

// Default value functions
fn default_app_name() -> String {
    "plural-chat".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_database_url(data_dir: &Path) -> String {
    format!("sqlite://{}", data_dir.join("app.db").display())
}

fn default_max_connections() -> u32 {
    5
}

fn default_pluralkit_url() -> String {
    "https://api.pluralkit.me".to_string()
}

fn default_simplyplural_url() -> String {
    "https://api.apparyllis.com".to_string()
}

fn default_avatar_delay_ms() -> u64 {
    1000
}

fn default_http_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("PLURAL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let backend = match lookup("STORAGE_BACKEND") {
            None => StorageBackend::default(),
            Some(value) => match value.to_lowercase().as_str() {
                "sqlite" => StorageBackend::Sqlite,
                "file" => StorageBackend::File,
                _ => return Err(ConfigError::InvalidValue("STORAGE_BACKEND", value)),
            },
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").unwrap_or_else(|| default_database_url(&data_dir)),
                max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
            },
            import: ImportConfig {
                pluralkit_url: lookup("PLURALKIT_API_URL").unwrap_or_else(default_pluralkit_url),
                simplyplural_url: lookup("SIMPLYPLURAL_API_URL")
                    .unwrap_or_else(default_simplyplural_url),
                avatar_delay: Duration::from_millis(
                    parse_var(&lookup, "AVATAR_FETCH_DELAY_MS")?
                        .unwrap_or_else(default_avatar_delay_ms),
                ),
                http_timeout: Duration::from_secs(
                    parse_var(&lookup, "HTTP_TIMEOUT_SECS")?
                        .unwrap_or_else(default_http_timeout_secs),
                ),
            },
            storage: StorageConfig {
                settings_file: lookup("SETTINGS_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| data_dir.join("settings.json")),
                data_dir,
                backend,
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
