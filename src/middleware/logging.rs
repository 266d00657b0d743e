//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{
    extract::Request,
    http::{HeaderMap, Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Header carrying the request id back to the caller
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upstream calls slower than this are flagged
const SLOW_REQUEST_SECS: u64 = 5;

/// Request logging middleware
///
/// Wraps every request in a span with a fresh request id and logs its outcome
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    async move {
        info!(
            "Request started: {} {} - User-Agent: {}",
            method,
            uri.path(),
            headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown")
        );

        let mut response = next.run(request).await;

        let duration = start_time.elapsed();
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            warn!(
                "Request failed: {} - Duration: {:.2}ms",
                status,
                duration.as_secs_f64() * 1000.0
            );
        } else {
            info!(
                "Request completed: {} - Duration: {:.2}ms",
                status,
                duration.as_secs_f64() * 1000.0
            );
        }

        if duration.as_secs() > SLOW_REQUEST_SECS {
            warn!(
                "Slow request detected: {} {} - Duration: {:.2}s",
                method,
                uri.path(),
                duration.as_secs_f64()
            );
        }

        if let Ok(value) = request_id.parse() {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}
