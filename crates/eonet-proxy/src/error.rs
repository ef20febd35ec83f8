//! Error types for the proxy routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eonet_client::EonetError;
use thiserror::Error;

/// Error code carried by every upstream failure response.
pub const UPSTREAM_ERROR_CODE: &str = "EONET_UPSTREAM_ERROR";

/// Errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// EONET could not be reached or rejected the request.
    #[error(transparent)]
    Upstream(#[from] EonetError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ProxyError::Upstream(err) => {
                tracing::error!(url = err.url().unwrap_or("-"), "EONET upstream error: {}", err);
                (StatusCode::BAD_GATEWAY, UPSTREAM_ERROR_CODE)
            }
        };

        let body = serde_json::json!({
            "error": code,
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for route handlers.
pub type Result<T> = std::result::Result<T, ProxyError>;
