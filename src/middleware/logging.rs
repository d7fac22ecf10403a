//! Request logging.
//!
//! Records one line per inbound request before anything else runs:
//! ISO-8601 timestamp, method and path (with query). It never rejects or
//! alters the request.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{SecondsFormat, Utc};
use tracing::info;

/// Middleware that logs every incoming request.
pub async fn log_request(request: Request, next: Next) -> Response {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    info!(
        timestamp = %timestamp,
        method = %request.method(),
        path,
        "Incoming request"
    );

    next.run(request).await
}
