//! Error types for finboard-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use finboard_core::{CoreError, ErrorCode, ErrorSeverity};
use finboard_gateway::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("Backend request failed: {0}")]
    Upstream(#[from] GatewayError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Core(e) if e.code() == ErrorCode::RecordNotFound => StatusCode::NOT_FOUND,
            ApiError::Core(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.to_string(),
        });

        match &self {
            ApiError::Core(e) => {
                match e.severity() {
                    ErrorSeverity::Info => log::debug!("{}", e),
                    ErrorSeverity::Warning => log::warn!("{}", e),
                    ErrorSeverity::Error => log::error!("{}", e),
                }
                body["details"] = serde_json::json!(e.to_details());
            }
            _ if status.is_server_error() => log::error!("{}", self),
            _ => log::debug!("{}", self),
        }

        (status, Json(body)).into_response()
    }
}
