//! Configuration management for the café register
//!
//! This module handles loading, validation, and management of
//! register configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

/// Environment variable that overrides `store.api_key`
pub const API_KEY_ENV: &str = "CAFE_STORE_API_KEY";

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Which transaction store implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted table reached over PostgREST
    Rest,
    /// In-process store, lost on exit
    Memory,
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Rest
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Rest => write!(f, "rest"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Transaction store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store implementation
    #[serde(default)]
    pub backend: StoreBackend,
    /// Base URL of the hosted project (without `/rest/v1`)
    #[serde(default)]
    pub url: String,
    /// API key sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,
    /// Table holding the transactions
    #[serde(default = "default_table")]
    pub table: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: String::new(),
            api_key: String::new(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_table() -> String {
    "transactions".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Currency display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Three-letter code appended to every monetary figure
    #[serde(default = "default_currency")]
    pub code: String,
    /// Number of decimal places shown; only 2 is accepted
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_currency() -> String {
    "MAD".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Delete authorization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret required to delete a transaction
    #[serde(default = "default_delete_password")]
    pub delete_password: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            delete_password: default_delete_password(),
        }
    }
}

fn default_delete_password() -> String {
    "010203".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Store settings
    #[serde(default)]
    pub store: StoreConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Delete authorization
    #[serde(default)]
    pub security: SecurityConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::IoError)?;

        let mut config = Self::from_yaml(&content)?;

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.store.api_key = key;
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.store.backend == StoreBackend::Rest {
            if self.store.url.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "store.url".to_string(),
                });
            }
            if self.store.api_key.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "store.api_key".to_string(),
                });
            }
        }

        if self.store.table.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.table".to_string(),
                reason: "Table name must not be empty".to_string(),
            });
        }

        if self.store.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.timeout_secs".to_string(),
                reason: "Timeout must be at least one second".to_string(),
            });
        }

        let code = &self.currency.code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidValue {
                field: "currency.code".to_string(),
                reason: "Currency code must be three uppercase letters".to_string(),
            });
        }

        if self.currency.decimal_places != 2 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Amounts are shown with exactly two decimal places".to_string(),
            });
        }

        if self.security.delete_password.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "security.delete_password must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================
