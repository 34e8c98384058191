//! Error responses.
//!
//! # Responsibilities
//! - Map access layer failures to HTTP status codes
//! - Render every error as `{"detail": "..."}`
//!
//! # Status mapping
//! - Unknown entity → 404 Not Found
//! - Upstream unreachable or non-2xx after retries → 503 Service Unavailable
//! - Upstream body or record not in the expected shape → 502 Bad Gateway
//! - Request rejected before reaching upstream → 400 Bad Request

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::access::AccessError;
use crate::upstream::UpstreamError;

/// Errors returned by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Access(#[from] AccessError),

    /// An upstream record is missing fields of the public schema.
    #[error("malformed upstream {kind} record: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A search matched nothing.
    #[error("{0}")]
    NotFound(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Access(AccessError::NotFound { .. }) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Access(AccessError::Upstream(e)) => match e {
                UpstreamError::Status { .. }
                | UpstreamError::Transport { .. }
                | UpstreamError::DeadlineExceeded { .. } => StatusCode::SERVICE_UNAVAILABLE,
                UpstreamError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                UpstreamError::Decode { .. } | UpstreamError::InvalidUrl(_) => StatusCode::BAD_GATEWAY,
            },
            ApiError::Malformed { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Upstream failure");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
