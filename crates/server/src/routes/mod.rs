//! HTTP endpoint implementations.
//!
//! - `health`: liveness probe
//! - `recognize`: the audio recognition endpoint
//!
//! Plus the two classification leftovers: OPTIONS probes and routing misses.

pub mod health;
pub mod recognize;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;

/// Empty 200 for OPTIONS probes on the defined routes. Preflights carrying
/// CORS request headers are answered by the CORS layer before reaching here.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Catch-all for unmatched paths: OPTIONS still succeeds with an empty 200,
/// everything else is a routing miss.
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        ServerError::NotFound.into_response()
    }
}
