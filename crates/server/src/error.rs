//! Request-boundary error handling.
//!
//! Every failure is caught here and converted to a response envelope; none
//! propagates far enough to take the process down. Server-side failures are
//! logged with their source detail before the sanitized envelope goes out.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use recognizer::RecognizerError;

use crate::envelope::ResponseEnvelope;

pub type ServerResult<T> = Result<T, ServerError>;

/// Failures surfaced at the request boundary.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// `POST /recognize` arrived with a zero-length body. Client error,
    /// answered before the collaborator is ever invoked.
    #[error("Empty audio data")]
    EmptyAudio,

    /// The request body stream failed before end-of-stream.
    #[error("Request error")]
    Request(#[source] axum::Error),

    /// The recognition collaborator failed during encode or recognize.
    #[error(transparent)]
    Recognizer(#[from] RecognizerError),

    /// No route matches the request. Expected traffic shape, not logged as
    /// an error.
    #[error("Not found")]
    NotFound,

    /// Invalid startup configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::EmptyAudio => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Request(_) | ServerError::Recognizer(_) | ServerError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the failure envelope. Transport internals never
    /// reach the wire.
    fn wire_message(&self) -> String {
        match self {
            ServerError::Recognizer(err) => err.client_message(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            match &self {
                ServerError::Request(source) => {
                    tracing::error!(error = %source, "request stream failed")
                }
                ServerError::Recognizer(source) => {
                    tracing::error!(error = %source, "recognition failed")
                }
                other => tracing::error!(error = %other, "request failed"),
            }
        }

        (status, Json(ResponseEnvelope::failure(self.wire_message()))).into_response()
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("invalid listen address: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: &ServerError) -> StatusCode {
        err.status_code()
    }

    #[test]
    fn status_mapping() {
        assert_eq!(status_of(&ServerError::EmptyAudio), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(&ServerError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(&ServerError::Request(axum::Error::new(
                std::io::Error::other("connection reset")
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(&ServerError::Recognizer(RecognizerError::Encode(
                "bad".into()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn wire_messages_match_the_contract() {
        assert_eq!(ServerError::EmptyAudio.wire_message(), "Empty audio data");
        assert_eq!(ServerError::NotFound.wire_message(), "Not found");
        assert_eq!(
            ServerError::Request(axum::Error::new(std::io::Error::other("reset")))
                .wire_message(),
            "Request error"
        );
        assert_eq!(
            ServerError::Recognizer(RecognizerError::Recognize("backend offline".into()))
                .wire_message(),
            "recognition failed: backend offline"
        );
    }
}
