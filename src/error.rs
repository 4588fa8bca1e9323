//! Gateway error kinds and their HTTP mapping.
//!
//! Every rejected request maps to exactly one of these variants; the
//! `IntoResponse` impl renders the client-visible JSON body and the pipeline
//! driver emits the matching log line.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Request-scoped failures surfaced by the gateway pipeline.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Client exceeded the per-window request ceiling. Hard reject, no
    /// queueing or retry scheduling.
    #[error("Too many requests")]
    RateLimitExceeded,

    /// Missing or mismatched API key on a path under the API prefix.
    #[error("Access denied. Invalid API key.")]
    Unauthorized,

    /// Path is under the API prefix but matches no configured namespace.
    #[error("No matching route found")]
    RouteNotFound,

    /// Upstream could not be reached or timed out. Carries the attempted
    /// target so the audit log names it.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream answered with an error status of its own. The response is
    /// relayed as-is; this variant exists for log classification.
    #[error("Upstream returned error status {0}")]
    UpstreamError(StatusCode),

    /// Route matched but its upstream base URL is empty or unset.
    #[error("Upstream base URL for route {0:?} is not configured")]
    ConfigurationInvalid(String),

    /// Request body exceeds the configured ceiling.
    #[error("Request body exceeds the configured limit")]
    PayloadTooLarge,
}

impl GatewayError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::RouteNotFound => StatusCode::NOT_FOUND,
            GatewayError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            GatewayError::UpstreamError(status) => *status,
            GatewayError::ConfigurationInvalid(_) => StatusCode::BAD_GATEWAY,
            GatewayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
