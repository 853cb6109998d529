//! Configuration module
//!
//! Settings are layered: built-in defaults, then `config.toml` (from the
//! config directory or an explicit path), then `CONFIG_ADMIN__*` environment
//! variables, e.g. `CONFIG_ADMIN__SERVER__PORT=9000`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "config-admin";
const ENV_PREFIX: &str = "CONFIG_ADMIN";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix for every management endpoint, e.g. `/admin`. Empty mounts
    /// them at the root.
    #[serde(default)]
    pub context_path: String,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            context_path: String::new(),
            cors_enabled: true,
        }
    }
}

impl ServerConfig {
    /// Context path with a single leading slash and no trailing slash, or an
    /// empty string when endpoints are mounted at the root.
    pub fn normalized_context_path(&self) -> String {
        normalize_context_path(&self.context_path)
    }
}

pub fn normalize_context_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database
    pub path: Option<String>,
}

impl DatabaseConfig {
    pub fn get_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            PathBuf::from(path)
        } else {
            get_data_dir().join("data.db")
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "config_admin=info,tower_http=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Get the data directory
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .or_else(|| dirs::home_dir().map(|h| h.join(format!(".{}", APP_DIR))))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
}

/// Get the config directory
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(get_data_dir)
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Load configuration from the default file location and the environment
pub fn load_config() -> Result<AppConfig, ::config::ConfigError> {
    load_config_from(&default_config_path())
}

/// Load configuration from a specific file (optional) and the environment
pub fn load_config_from(path: &Path) -> Result<AppConfig, ::config::ConfigError> {
    ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

/// Save configuration to the default file location
pub fn save_config(config: &AppConfig) -> anyhow::Result<PathBuf> {
    let path = default_config_path();
    save_config_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file
pub fn save_config_to(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;

    Ok(())
}
