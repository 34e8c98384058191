//! Request handling middleware.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) unless the client sent one
//! - Echo the request ID on the response
//! - Count responses by status for metrics
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing

use axum::{
    body::Body,
    http::{HeaderName, Request},
    middleware::Next,
    response::Response,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer assigning `x-request-id` to requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer copying `x-request-id` from the request onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// Request ID of an incoming request, or `"unknown"`.
pub fn request_id(request: &Request<Body>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Middleware recording `hub_http_requests_total` per response status.
pub async fn record_http_metrics(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let id = request_id(&request).to_string();

    let response = next.run(request).await;
    let status = response.status();

    metrics::counter!("hub_http_requests_total", "status" => status.as_u16().to_string()).increment(1);
    if status.is_server_error() {
        tracing::warn!(request_id = %id, path = %path, status = %status, "Request failed");
    }
    response
}
