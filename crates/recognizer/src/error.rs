//! Error surface of the recognition boundary.
//!
//! Failures are typed so the HTTP layer can map them to status codes and
//! decide which detail is safe to place on the wire.

use thiserror::Error;

/// Errors surfaced by recognition collaborators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecognizerError {
    /// The encode step rejected the audio.
    #[error("audio encode failed: {0}")]
    Encode(String),

    /// The recognize step failed after a successful encode.
    #[error("recognition failed: {0}")]
    Recognize(String),

    /// The upstream daemon answered with a non-success status.
    #[error("recognition service returned status {status}")]
    UpstreamStatus {
        /// HTTP status the upstream produced.
        status: u16,
    },

    /// The upstream daemon could not be reached, timed out, or produced an
    /// unreadable response.
    #[error("recognition service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collaborator was configured incorrectly. Raised at startup, never
    /// per request.
    #[error("invalid recognizer configuration: {0}")]
    InvalidConfig(String),
}

impl RecognizerError {
    /// Message safe to place in a client-facing response.
    ///
    /// Domain failures keep their message; transport detail (addresses,
    /// socket errors) stays in the logs.
    pub fn client_message(&self) -> String {
        match self {
            RecognizerError::Transport(_) => "Recognition failed".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_failures_keep_their_message() {
        let err = RecognizerError::Encode("unsupported sample rate".into());
        assert_eq!(
            err.client_message(),
            "audio encode failed: unsupported sample rate"
        );

        let err = RecognizerError::UpstreamStatus { status: 502 };
        assert_eq!(err.client_message(), "recognition service returned status 502");
    }
}
