use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Liveness probe.
///
/// The body is fixed: supervisors poll for exactly `{"status":"ok"}` while
/// waiting for the service to come up, so nothing else is added here.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
