//! Configuration management for finboard
//!
//! This module handles loading, validation, and management of
//! finboard configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;

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

/// Remote transactions service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL every backend path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Records per page for lists
    #[serde(default = "default_records_per_page")]
    pub records_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            records_per_page: default_records_per_page(),
        }
    }
}

fn default_records_per_page() -> usize {
    10
}

/// Categorization progress polling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Milliseconds between two progress requests
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    1000
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

/// Currency and number formatting (pt-BR conventions by default)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol shown in chart axis titles
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
        }
    }
}

fn default_symbol() -> String {
    "R$".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ".".to_string()
}

fn default_decimal_sep() -> String {
    ",".to_string()
}

/// Time bucket used by the aggregation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Day,
    Week,
    Month,
    Trimester,
    Year,
}

impl GroupBy {
    /// All buckets, in the order the selector lists them
    pub const ALL: [GroupBy; 5] = [
        GroupBy::Day,
        GroupBy::Week,
        GroupBy::Month,
        GroupBy::Trimester,
        GroupBy::Year,
    ];

    /// Label shown in the group-by selector
    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::Day => "Day",
            GroupBy::Week => "Week",
            GroupBy::Month => "Month",
            GroupBy::Trimester => "Trimester",
            GroupBy::Year => "Year",
        }
    }
}

impl Default for GroupBy {
    fn default() -> Self {
        GroupBy::Month
    }
}

impl std::str::FromStr for GroupBy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(GroupBy::Day),
            "week" => Ok(GroupBy::Week),
            "month" => Ok(GroupBy::Month),
            "trimester" | "quarter" => Ok(GroupBy::Trimester),
            "year" => Ok(GroupBy::Year),
            _ => Err(format!("Invalid group_by: {}", s)),
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupBy::Day => write!(f, "day"),
            GroupBy::Week => write!(f, "week"),
            GroupBy::Month => write!(f, "month"),
            GroupBy::Trimester => write!(f, "trimester"),
            GroupBy::Year => write!(f, "year"),
        }
    }
}

/// Data visualization page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatavizConfig {
    /// Preselected time bucket
    #[serde(default)]
    pub default_group_by: GroupBy,
    /// Values offered as `transaction_source` checkboxes
    #[serde(default = "default_sources")]
    pub transaction_sources: Vec<String>,
}

impl Default for DatavizConfig {
    fn default() -> Self {
        Self {
            default_group_by: GroupBy::default(),
            transaction_sources: default_sources(),
        }
    }
}

fn default_sources() -> Vec<String> {
    vec!["checking".to_string(), "credit_card".to_string()]
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend service settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Progress polling settings
    #[serde(default)]
    pub progress: ProgressConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Data visualization settings
    #[serde(default)]
    pub dataviz: DatavizConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        let config = Self::from_yaml(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::FileNotFound { path }) => {
                log::warn!("Config file {} not found, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| {
            log::error!("Invalid configuration YAML: {}", e);
            ConfigError::InvalidYaml
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let base_url = self.backend.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "backend.base_url".to_string(),
            });
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.pagination.records_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.records_per_page".to_string(),
                reason: "Records per page must be greater than 0".to_string(),
            });
        }

        if self.progress.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "progress.poll_interval_ms".to_string(),
                reason: "Poll interval must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.currency.thousands_separator == self.currency.decimal_separator {
            return Err(ConfigError::ValidationError {
                message: "Thousands and decimal separators must differ".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the dashboard listens on
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Default config location relative to the working directory
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.yaml")
    }
}

// ==================== Tests ====================
