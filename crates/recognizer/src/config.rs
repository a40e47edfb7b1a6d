use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime configuration describing which collaborator backs recognition.
///
/// Designed to be embedded in the server's configuration tree and filled from
/// files or environment variables; every field carries a serde default so a
/// partial configuration deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecognizerConfig {
    /// Backend selector: `"http"` forwards to an upstream fingerprint daemon,
    /// `"static"` answers from canned matches without leaving the process.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Base URL of the upstream daemon. Required when `mode` is `"http"`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Path of the encode operation on the upstream.
    #[serde(default = "default_encode_path")]
    pub encode_path: String,

    /// Path of the recognize operation on the upstream.
    #[serde(default = "default_recognize_path")]
    pub recognize_path: String,

    /// Overall timeout for a single upstream call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            base_url: None,
            encode_path: default_encode_path(),
            recognize_path: default_recognize_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RecognizerConfig {
    /// Upstream call timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_mode() -> String {
    "static".to_string()
}

fn default_encode_path() -> String {
    "/encode".to_string()
}

fn default_recognize_path() -> String {
    "/recognize".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RecognizerConfig::default();
        assert_eq!(cfg.mode, "static");
        assert!(cfg.base_url.is_none());
        assert_eq!(cfg.encode_path, "/encode");
        assert_eq!(cfg.recognize_path, "/recognize");
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_config_deserializes() {
        let cfg: RecognizerConfig =
            serde_json::from_str(r#"{"mode":"http","base_url":"http://127.0.0.1:8060"}"#).unwrap();
        assert_eq!(cfg.mode, "http");
        assert_eq!(cfg.base_url.as_deref(), Some("http://127.0.0.1:8060"));
        assert_eq!(cfg.timeout_secs, 30);
    }
}
