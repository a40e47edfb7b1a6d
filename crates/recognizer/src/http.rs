//! HTTP-backed collaborator.
//!
//! Forwards audio bytes to an upstream fingerprint daemon exposing the two
//! operations as octet-stream POST endpoints. The daemon's match payload is
//! treated as opaque JSON and passed through without inspection.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::{AudioRecognizer, Match, RecognizerConfig, RecognizerError};

const OCTET_STREAM: &str = "application/octet-stream";

/// Collaborator that delegates both operations to an upstream HTTP daemon.
///
/// Every call is bounded by the client-level timeout from
/// [`RecognizerConfig::timeout_secs`]; a hung upstream surfaces as a
/// [`Transport`](RecognizerError::Transport) error rather than stalling the
/// caller indefinitely.
pub struct HttpRecognizer {
    client: reqwest::Client,
    encode_url: String,
    recognize_url: String,
}

impl HttpRecognizer {
    /// Build a client for the upstream described by `config`.
    pub fn new(config: &RecognizerConfig) -> Result<Self, RecognizerError> {
        let base = config
            .base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                RecognizerError::InvalidConfig("base_url is required for http mode".into())
            })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(RecognizerError::Transport)?;

        Ok(Self {
            client,
            encode_url: format!("{base}{}", config.encode_path),
            recognize_url: format!("{base}{}", config.recognize_path),
        })
    }

    async fn post_bytes(&self, url: &str, body: Vec<u8>) -> Result<reqwest::Response, RecognizerError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, OCTET_STREAM)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecognizerError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl AudioRecognizer for HttpRecognizer {
    async fn encode(&self, audio: &[u8]) -> Result<Vec<u8>, RecognizerError> {
        let response = self.post_bytes(&self.encode_url, audio.to_vec()).await?;
        let encoded = response.bytes().await?;

        tracing::debug!(
            input_bytes = audio.len(),
            encoded_bytes = encoded.len(),
            "audio encoded by upstream"
        );

        Ok(encoded.to_vec())
    }

    async fn recognize(&self, encoded: &[u8]) -> Result<Vec<Match>, RecognizerError> {
        let response = self.post_bytes(&self.recognize_url, encoded.to_vec()).await?;
        let payload: Value = response.json().await?;
        parse_matches(payload)
    }
}

/// Normalize the result shapes the upstream is known to produce: a bare
/// array, an object with a `result` array, or null for "no match".
fn parse_matches(payload: Value) -> Result<Vec<Match>, RecognizerError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("result") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(RecognizerError::Recognize(format!(
                "unexpected match payload: {}",
                kind_of(&other)
            ))),
        },
        other => Err(RecognizerError::Recognize(format!(
            "unexpected match payload: {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_missing_results_normalize_to_empty() {
        assert!(parse_matches(json!(null)).unwrap().is_empty());
        assert!(parse_matches(json!({})).unwrap().is_empty());
        assert!(parse_matches(json!({ "result": null })).unwrap().is_empty());
    }

    #[test]
    fn arrays_pass_through_in_order() {
        let matches = parse_matches(json!([{ "id": 1 }, { "id": 2 }])).unwrap();
        assert_eq!(matches, vec![json!({ "id": 1 }), json!({ "id": 2 })]);

        let matches = parse_matches(json!({ "result": [{ "id": 3 }] })).unwrap();
        assert_eq!(matches, vec![json!({ "id": 3 })]);
    }

    #[test]
    fn scalar_payloads_are_rejected() {
        let err = parse_matches(json!({ "result": "gibberish" })).unwrap_err();
        assert!(matches!(err, RecognizerError::Recognize(_)));

        let err = parse_matches(json!(42)).unwrap_err();
        assert!(matches!(err, RecognizerError::Recognize(_)));
    }
}
