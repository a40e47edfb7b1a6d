use recognizer::AudioRecognizer;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared application state.
///
/// Constructed once at startup; each request sees it behind an `Arc`. The
/// recognizer is the only collaborator and is itself stateless per request.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,

    /// Recognition collaborator, shared across requests.
    pub recognizer: Arc<dyn AudioRecognizer>,
}

impl ServerState {
    /// Build state from configuration, selecting the collaborator backend.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let recognizer = recognizer::from_config(&config.recognizer)?;
        Ok(Self {
            config: Arc::new(config),
            recognizer,
        })
    }

    /// State with an explicitly provided collaborator. Used by tests to
    /// substitute a deterministic double.
    pub fn with_recognizer(config: ServerConfig, recognizer: Arc<dyn AudioRecognizer>) -> Self {
        Self {
            config: Arc::new(config),
            recognizer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_static_backend() {
        let state = ServerState::new(ServerConfig::default()).unwrap();
        assert_eq!(state.config.port, 3737);
    }
}
