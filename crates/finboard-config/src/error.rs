//! Error types for finboard-config

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable configuration error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    FileNotFound,
    InvalidYaml,
    MissingField,
    InvalidValue,
    IoError,
    ValidationError,
}

impl ConfigErrorCode {
    fn as_str(&self) -> &'static str {
        match self {
            ConfigErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ConfigErrorCode::InvalidYaml => "INVALID_YAML",
            ConfigErrorCode::MissingField => "MISSING_FIELD",
            ConfigErrorCode::InvalidValue => "INVALID_VALUE",
            ConfigErrorCode::IoError => "IO_ERROR",
            ConfigErrorCode::ValidationError => "VALIDATION_ERROR",
        }
    }
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How loudly a configuration problem should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigErrorSeverity {
    Warning,
    Error,
}

impl std::fmt::Display for ConfigErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorSeverity::Warning => write!(f, "warning"),
            ConfigErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Serializable report for the settings API and startup diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigErrorDetails {
    pub code: ConfigErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl std::fmt::Display for ConfigErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(field) = &self.field {
            write!(f, "\nField: {}", field)?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  - {}", suggestion)?;
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML format")]
    InvalidYaml,

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("IO error occurred")]
    IoError,

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// Get the error code
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::InvalidYaml => ConfigErrorCode::InvalidYaml,
            ConfigError::MissingField { .. } => ConfigErrorCode::MissingField,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            ConfigError::IoError => ConfigErrorCode::IoError,
            ConfigError::ValidationError { .. } => ConfigErrorCode::ValidationError,
        }
    }

    /// A missing file is recoverable (defaults apply), everything else is fatal
    pub fn severity(&self) -> ConfigErrorSeverity {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorSeverity::Warning,
            _ => ConfigErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ConfigErrorDetails {
        let (field, suggestions) = match self {
            ConfigError::FileNotFound { .. } => (
                None,
                vec![
                    "Pass --config to point at an existing file.".to_string(),
                    "Run with --print-default-config to get a starting point.".to_string(),
                ],
            ),
            ConfigError::InvalidYaml => (
                None,
                vec!["Check indentation and quoting in the YAML file.".to_string()],
            ),
            ConfigError::MissingField { field } => (
                Some(field.clone()),
                vec![format!("Add the '{}' field to your config file.", field)],
            ),
            ConfigError::InvalidValue { field, reason } => {
                (Some(field.clone()), vec![reason.clone()])
            }
            ConfigError::ValidationError { message } => (None, vec![message.clone()]),
            ConfigError::IoError => (
                None,
                vec!["Make sure the config file is readable.".to_string()],
            ),
        };

        ConfigErrorDetails {
            code: self.code(),
            message: self.to_string(),
            field,
            suggestions,
        }
    }
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_and_severity() {
        let missing = ConfigError::FileNotFound { path: "config.yaml".to_string() };
        assert_eq!(missing.code(), ConfigErrorCode::FileNotFound);
        assert_eq!(missing.severity(), ConfigErrorSeverity::Warning);

        let invalid = ConfigError::InvalidValue {
            field: "server.port".to_string(),
            reason: "Port must be greater than 0".to_string(),
        };
        assert_eq!(invalid.code().to_string(), "INVALID_VALUE");
        assert_eq!(invalid.severity(), ConfigErrorSeverity::Error);
    }

    #[test]
    fn test_details_carry_field() {
        let details = ConfigError::MissingField { field: "backend.base_url".to_string() }.to_details();
        assert_eq!(details.field.as_deref(), Some("backend.base_url"));
        assert_eq!(details.suggestions.len(), 1);
        assert!(details.to_string().starts_with("[MISSING_FIELD]"));
    }
}
