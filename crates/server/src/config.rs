use recognizer::RecognizerConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ServerResult;

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind. Loopback unless explicitly overridden.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Listening port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// How long in-flight requests may keep running after a shutdown signal,
    /// in milliseconds. When the window closes the process force-exits.
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,

    /// Log filter, `tracing` EnvFilter syntax.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Recognition collaborator settings.
    #[serde(default)]
    pub recognizer: RecognizerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
            log_level: default_log_level(),
            recognizer: RecognizerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration: optional `tunetag.*` file in the working
    /// directory, overridden by `TUNETAG__*` environment variables,
    /// overridden by a bare `PORT` variable for the listening port.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("tunetag").required(false))
            .add_source(config::Environment::with_prefix("TUNETAG").separator("__"));

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        // The original deployment drives the port with a bare PORT variable;
        // keep honoring it.
        if let Ok(raw) = std::env::var("PORT") {
            match parse_port(&raw) {
                Some(port) => config.port = port,
                None => tracing::warn!(value = %raw, "ignoring unparsable PORT override"),
            }
        }

        Ok(config)
    }

    /// The socket address to bind to.
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        Ok(format!("{}:{}", self.bind_addr, self.port).parse()?)
    }

    /// Shutdown grace window as a [`Duration`].
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse().ok()
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3737
}

fn default_shutdown_grace_ms() -> u64 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr, "127.0.0.1");
        assert_eq!(cfg.port, 3737);
        assert_eq!(cfg.shutdown_grace(), Duration::from_millis(3000));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.recognizer.mode, "static");
    }

    #[test]
    fn socket_addr_is_loopback_by_default() {
        let addr = ServerConfig::default().socket_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 3737);
    }

    #[test]
    fn socket_addr_rejects_garbage() {
        let cfg = ServerConfig {
            bind_addr: "not-an-ip".into(),
            ..ServerConfig::default()
        };
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn port_override_parsing() {
        assert_eq!(parse_port("8080"), Some(8080));
        assert_eq!(parse_port(" 3737 "), Some(3737));
        assert_eq!(parse_port("eighty"), None);
        assert_eq!(parse_port("99999"), None);
    }

    #[test]
    fn partial_file_config_deserializes() {
        let cfg: ServerConfig = serde_json::from_str(
            r#"{ "port": 4000, "recognizer": { "mode": "http", "base_url": "http://127.0.0.1:8060" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.bind_addr, "127.0.0.1");
        assert_eq!(cfg.recognizer.mode, "http");
    }
}
