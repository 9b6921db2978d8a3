//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Port used when neither `PORT` nor the config file sets one.
pub const DEFAULT_PORT: u16 = 8080;

/// Root configuration for the push service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    /// Overlay the value of the `PORT` environment variable.
    ///
    /// An unset or empty value keeps `listener.port` (from the config file,
    /// or [`DEFAULT_PORT`]). Anything else must parse as a TCP port.
    pub fn apply_port(&mut self, port: Option<&str>) -> Result<(), PortError> {
        match port.map(str::trim) {
            None | Some("") => {
                let port = self.listener.port;
                tracing::info!(port, "Defaulting to port {}", port);
            }
            Some(raw) => {
                self.listener.port = raw
                    .parse()
                    .map_err(|_| PortError(raw.to_string()))?;
            }
        }
        Ok(())
    }

    /// Overlay process environment settings onto this config.
    pub fn apply_env(&mut self) -> Result<(), PortError> {
        let port = std::env::var("PORT").ok();
        self.apply_port(port.as_deref())
    }
}

/// `PORT` held something that is not a TCP port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid PORT value: {0:?}")]
pub struct PortError(pub String);

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,
}

impl ListenerConfig {
    /// Full `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest request body the handler will buffer, in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 1024 * 1024, // 1MB
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
