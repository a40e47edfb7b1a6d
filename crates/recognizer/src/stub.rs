//! Deterministic in-process collaborator.
//!
//! Answers from canned data with no external dependency, which makes it both
//! the offline-development backend and the test double for the HTTP layer.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::{AudioRecognizer, Match, RecognizerError};

/// Collaborator that answers deterministically from canned matches.
///
/// Failure injection and artificial latency cover the error and concurrency
/// paths of callers; call counters make "the collaborator was never invoked"
/// assertions possible.
#[derive(Debug, Default)]
pub struct StaticRecognizer {
    matches: Vec<Match>,
    encode_failure: Option<String>,
    recognize_failure: Option<String>,
    latency: Option<Duration>,
    encode_calls: AtomicUsize,
    recognize_calls: AtomicUsize,
}

impl StaticRecognizer {
    /// Recognizer that answers every request with `matches`.
    pub fn new(matches: Vec<Match>) -> Self {
        Self {
            matches,
            ..Self::default()
        }
    }

    /// Recognizer that never matches anything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Recognizer whose encode step fails with `message`.
    pub fn failing_encode(message: impl Into<String>) -> Self {
        Self {
            encode_failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Recognizer whose recognize step fails with `message`.
    pub fn failing_recognize(message: impl Into<String>) -> Self {
        Self {
            recognize_failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Delay both operations by `latency`, to keep a request in flight while
    /// a test observes the rest of the service.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of encode invocations so far.
    pub fn encode_calls(&self) -> usize {
        self.encode_calls.load(Ordering::Relaxed)
    }

    /// Number of recognize invocations so far.
    pub fn recognize_calls(&self) -> usize {
        self.recognize_calls.load(Ordering::Relaxed)
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl AudioRecognizer for StaticRecognizer {
    async fn encode(&self, audio: &[u8]) -> Result<Vec<u8>, RecognizerError> {
        self.encode_calls.fetch_add(1, Ordering::Relaxed);
        self.pause().await;

        if let Some(message) = &self.encode_failure {
            return Err(RecognizerError::Encode(message.clone()));
        }

        Ok(audio.to_vec())
    }

    async fn recognize(&self, _encoded: &[u8]) -> Result<Vec<Match>, RecognizerError> {
        self.recognize_calls.fetch_add(1, Ordering::Relaxed);
        self.pause().await;

        if let Some(message) = &self.recognize_failure {
            return Err(RecognizerError::Recognize(message.clone()));
        }

        Ok(self.matches.clone())
    }
}
