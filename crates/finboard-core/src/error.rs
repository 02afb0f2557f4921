//! Error types for finboard-core
//!
//! Errors carry a stable code and a severity so the API layer can log and
//! render them without matching on every variant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No record with the given id in the cached list
    RecordNotFound,
    /// Start or end date missing from a chart request
    MissingDates,
    /// Date not in the expected format
    InvalidDate,
    /// Unknown value for an enumerated parameter
    InvalidParameter,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::RecordNotFound => write!(f, "RECORD_NOT_FOUND"),
            ErrorCode::MissingDates => write!(f, "MISSING_DATES"),
            ErrorCode::InvalidDate => write!(f, "INVALID_DATE"),
            ErrorCode::InvalidParameter => write!(f, "INVALID_PARAMETER"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Expected during normal use, e.g. a stale row
    Info,
    /// User input problem
    Warning,
    /// Operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub severity: ErrorSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// Main error type for finboard-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    #[error("Please select both start and end dates.")]
    MissingDates,

    #[error("Invalid date '{value}', expected {expected}")]
    InvalidDate { value: String, expected: String },

    #[error("Invalid value '{value}' for {name}")]
    InvalidParameter { name: String, value: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::RecordNotFound { .. } => ErrorCode::RecordNotFound,
            CoreError::MissingDates => ErrorCode::MissingDates,
            CoreError::InvalidDate { .. } => ErrorCode::InvalidDate,
            CoreError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::RecordNotFound { .. } => ErrorSeverity::Info,
            CoreError::MissingDates => ErrorSeverity::Warning,
            CoreError::InvalidDate { .. } => ErrorSeverity::Warning,
            CoreError::InvalidParameter { .. } => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let parameter = match self {
            CoreError::InvalidParameter { name, .. } => Some(name.clone()),
            CoreError::InvalidDate { value, .. } => Some(value.clone()),
            _ => None,
        };

        ErrorDetails {
            code: self.code(),
            severity: self.severity(),
            message: self.to_string(),
            parameter,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::RecordNotFound.to_string(), "RECORD_NOT_FOUND");
        assert_eq!(ErrorCode::MissingDates.to_string(), "MISSING_DATES");
    }

    #[test]
    fn test_missing_dates_message_is_user_facing() {
        let error = CoreError::MissingDates;
        assert_eq!(error.to_string(), "Please select both start and end dates.");
        assert_eq!(error.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_details_name_the_parameter() {
        let error = CoreError::InvalidParameter {
            name: "group_by".to_string(),
            value: "fortnight".to_string(),
        };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::InvalidParameter);
        assert_eq!(details.parameter.as_deref(), Some("group_by"));
        assert!(details.message.contains("fortnight"));
    }
}
