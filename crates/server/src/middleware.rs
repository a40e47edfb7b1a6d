//! Ambient request middleware: id tagging and lifecycle logging.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

/// Request id carried through extensions so handlers and the logger agree on
/// which request they are talking about.
#[derive(Clone)]
pub struct RequestId(pub String);

/// Tag every request with an id (client-provided `x-request-id` or a fresh
/// uuid) and echo it on the response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = id.parse() {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Log request start and completion with latency. Routing misses land here
/// at info level; failures get their own error logs at the point of failure.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let start = Instant::now();

    tracing::debug!(method = %method, uri = %uri, request_id = %id, "request started");

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        request_id = %id,
        "request completed"
    );

    response
}
