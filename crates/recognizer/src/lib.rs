//! recognizer: the boundary to the external audio recognition facility.
//!
//! The service itself never decodes audio or matches fingerprints; both
//! operations live behind [`AudioRecognizer`]. Two backends are provided:
//!
//! - [`HttpRecognizer`] forwards bytes to an upstream fingerprint daemon
//!   over HTTP (the production backend),
//! - [`StaticRecognizer`] answers deterministically in-process, for offline
//!   development and tests.
//!
//! Match records are opaque to this crate: whatever the facility returns is
//! passed through verbatim as [`Match`] values.
//!
//! # Example
//!
//! ```no_run
//! use recognizer::{AudioRecognizer, RecognizerConfig};
//!
//! # async fn demo() -> Result<(), recognizer::RecognizerError> {
//! let cfg = RecognizerConfig {
//!     mode: "http".into(),
//!     base_url: Some("http://127.0.0.1:8060".into()),
//!     ..RecognizerConfig::default()
//! };
//!
//! let recognizer = recognizer::from_config(&cfg)?;
//! let encoded = recognizer.encode(b"raw audio bytes").await?;
//! let matches = recognizer.recognize(&encoded).await?;
//! println!("{} match(es)", matches.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod http;
mod stub;

pub use config::RecognizerConfig;
pub use error::RecognizerError;
pub use http::HttpRecognizer;
pub use stub::StaticRecognizer;

use async_trait::async_trait;
use std::sync::Arc;

/// One match record produced by the recognition facility.
///
/// The shape is owned by the facility and is not inspected here; callers
/// receive it exactly as the facility produced it.
pub type Match = serde_json::Value;

/// Asynchronous boundary to an audio recognition facility.
///
/// Implementations must be safe to share across concurrent requests; the
/// server holds a single instance behind an `Arc` for the process lifetime.
#[async_trait]
pub trait AudioRecognizer: Send + Sync {
    /// Prepare raw audio bytes for matching.
    async fn encode(&self, audio: &[u8]) -> Result<Vec<u8>, RecognizerError>;

    /// Match previously encoded audio against the facility's catalog.
    ///
    /// An absent or null result on the facility side is normalized to an
    /// empty vector; callers never observe null.
    async fn recognize(&self, encoded: &[u8]) -> Result<Vec<Match>, RecognizerError>;
}

/// Select and construct the collaborator backend described by `config`.
pub fn from_config(config: &RecognizerConfig) -> Result<Arc<dyn AudioRecognizer>, RecognizerError> {
    match config.mode.as_str() {
        "http" => Ok(Arc::new(HttpRecognizer::new(config)?)),
        "static" => {
            tracing::warn!(
                "static recognizer selected; every request will answer with no matches"
            );
            Ok(Arc::new(StaticRecognizer::empty()))
        }
        other => Err(RecognizerError::InvalidConfig(format!(
            "unknown recognizer mode: {other}"
        ))),
    }
}
