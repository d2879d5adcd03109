//! Unified error types and the JSON error envelope.
//!
//! Every non-2xx response this service emits carries the same
//! `{error, message}` body shape. Handlers never build error bodies
//! themselves; the envelope is produced at the router boundary (see
//! [`crate::api::routes`]) or by [`ServiceError`]'s `IntoResponse`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Unified error type for the info service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error (bind, accept).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// The uniform `{error, message}` body used for all non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error category, e.g. "Not Found".
    pub error: String,
    /// Human-readable detail. Never contains internal diagnostics.
    pub message: String,
}

impl ErrorEnvelope {
    /// Envelope for unmatched routes.
    pub fn not_found() -> Self {
        Self {
            error: "Not Found".to_string(),
            message: "Endpoint does not exist".to_string(),
        }
    }

    /// Envelope for framework-level rejections (405 and friends).
    pub fn http_error(status: StatusCode) -> Self {
        Self {
            error: "HTTP Error".to_string(),
            message: status
                .canonical_reason()
                .unwrap_or("Request rejected")
                .to_string(),
        }
    }

    /// Envelope for unhandled internal failures. Deliberately opaque.
    pub fn internal() -> Self {
        Self {
            error: "Internal Server Error".to_string(),
            message: "An unexpected error occurred".to_string(),
        }
    }

    /// Classify a non-2xx status into its envelope.
    pub fn for_status(status: StatusCode) -> Self {
        if status == StatusCode::NOT_FOUND {
            Self::not_found()
        } else if status.is_server_error() {
            Self::internal()
        } else {
            Self::http_error(status)
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        // Full detail stays server-side; the client gets the opaque envelope.
        error!("Unhandled error: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope::internal()),
        )
            .into_response()
    }
}
