//! tunetag server: a single-endpoint HTTP shim over the audio recognition
//! collaborator.
//!
//! The service accepts raw audio bytes, hands them to the recognition
//! facility (`encode` then `recognize`), and answers with a fixed JSON
//! envelope. Everything hard (codecs, fingerprint matching) lives behind
//! the [`recognizer`] boundary; this crate contributes request plumbing,
//! buffering, and lifecycle management.
//!
//! # HTTP surface
//!
//! | Method  | Path        | Success                               | Failure |
//! |---------|-------------|---------------------------------------|---------|
//! | OPTIONS | any         | 200, empty body                       | —       |
//! | POST    | /recognize  | `{"code":200,"data":{"result":[..]}}` | 400/500 `{"code":-1,"message":..}` |
//! | GET     | /health     | `{"status":"ok"}`                     | —       |
//! | *       | anything else | —                                   | 404 `{"code":-1,"message":"Not found"}` |
//!
//! Every response carries `Content-Type: application/json` and
//! `Access-Control-Allow-Origin: *`.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! The listener binds loopback port 3737 by default; `PORT` or
//! `TUNETAG__PORT` override it. On SIGINT/SIGTERM the server stops
//! accepting and drains in-flight requests before exiting 0; if draining
//! outlives the grace period the process force-exits 1 instead.

pub mod config;
pub mod envelope;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use envelope::{EnvelopeData, ResponseEnvelope};
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
