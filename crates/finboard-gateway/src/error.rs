//! Error types for finboard-gateway

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl GatewayError {
    pub(crate) fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        GatewayError::Transport {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    pub(crate) fn decode(endpoint: &str, message: impl std::fmt::Display) -> Self {
        GatewayError::Decode {
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        }
    }

    /// Endpoint path the failed call went to, if any
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            GatewayError::InvalidUrl { .. } => None,
            GatewayError::Transport { endpoint, .. } | GatewayError::Decode { endpoint, .. } => {
                Some(endpoint)
            }
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
