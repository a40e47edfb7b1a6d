//! Router assembly and process lifecycle.
//!
//! This module owns the two process-wide resources: the listening socket and
//! the shutdown wiring. The router classifies requests into the recognize
//! handler, the health probe, OPTIONS short-circuits, and the 404 fallback;
//! the lifecycle half binds the listener, serves until SIGINT/SIGTERM, then
//! drains in-flight requests under a bounded grace period.

use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::{from_fn, map_response};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::middleware::{log_requests, request_id};
use crate::routes::{self, health, recognize};
use crate::state::ServerState;

/// Build the router with all routes and middleware.
///
/// Public so integration tests can drive the exact production stack without
/// opening a socket.
///
/// Middleware, outermost first: trace, request id, request logging, content
/// type enforcement, CORS, and the 405→404 rewrite. The content-type layer
/// sits outside CORS so preflight responses produced by the CORS layer carry
/// `application/json` like everything else.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/recognize",
            post(recognize::recognize_audio).options(routes::preflight),
        )
        .route(
            "/health",
            get(health::health_check).options(routes::preflight),
        )
        .fallback(routes::fallback)
        .layer(map_response(route_miss))
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The wire contract has no 405: a known path with the wrong method is just
/// an unknown route.
async fn route_miss(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return ServerError::NotFound.into_response();
    }
    response
}

/// Start the service and block until shutdown completes.
///
/// Initializes tracing, builds state and router, binds the configured
/// address (loopback:3737 unless overridden), and serves with graceful
/// shutdown. Returns `Ok(())` on a clean drain, after which the process
/// exits 0; if draining outlives the grace period the forced-exit timer
/// terminates the process with status 1 instead.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_target(false)
        .json()
        .init();

    let grace = config.shutdown_grace();
    let state = Arc::new(ServerState::new(config.clone())?);
    let app = build_router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("audio recognition service listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(grace))
        .await?;

    tracing::info!("server closed");
    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM, which starts the
/// graceful drain and arms the forced-exit timer.
///
/// The signal future resolves exactly once, so the timer is armed exactly
/// once. tokio keeps the handlers registered for the life of the process, so
/// a second signal during the drain is absorbed rather than starting another
/// shutdown sequence.
async fn shutdown_signal(grace: Duration) {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }

    force_exit_after(grace);
}

/// Liveness backstop: if in-flight work outlives the grace window the
/// process exits 1 instead of hanging on a stalled request. Dropping that
/// work is the accepted cost.
fn force_exit_after(grace: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        tracing::error!(
            grace_ms = grace.as_millis() as u64,
            "shutdown grace period elapsed, forcing exit"
        );
        std::process::exit(1);
    });
}
