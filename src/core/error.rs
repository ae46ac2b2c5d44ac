//! Typed errors surfaced at the API boundary
//!
//! Store and loader internals return `anyhow::Result`; the service converts
//! failures into [`SalesError`] so the transport can map them to a status
//! code and a stable error code.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.list(&query).await {
//!     Ok(page) => println!("{} items", page.pagination.total_items),
//!     Err(SalesError::Storage { backend, .. }) => eprintln!("{} is down", backend),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalesError {
    /// The configured store failed to answer
    #[error("{backend} query failed: {message}")]
    Storage { backend: String, message: String },

    /// Invalid or unsupported configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The record set could not be loaded
    #[error("Failed to load records: {0}")]
    Load(String),

    /// The request could not be interpreted at all
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`, mirrors the success envelope
    pub success: bool,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl SalesError {
    pub fn storage(backend: &str, err: impl std::fmt::Display) -> Self {
        SalesError::Storage {
            backend: backend.to_string(),
            message: err.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SalesError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            SalesError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalesError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalesError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SalesError::Storage { .. } => "STORAGE_ERROR",
            SalesError::Config(_) => "CONFIG_ERROR",
            SalesError::Load(_) => "LOAD_ERROR",
            SalesError::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for SalesError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
