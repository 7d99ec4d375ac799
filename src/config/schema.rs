//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section is defaulted so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Port used when neither the command line nor the config file names one.
pub const DEFAULT_PORT: u16 = 8000;

/// Realm announced in the Basic challenge.
pub const DEFAULT_REALM: &str = "http4k-bin";

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BinConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Basic-auth settings.
    pub auth: AuthConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl BinConfig {
    /// Override the listening port (command-line argument wins over the file).
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.listener.port = port;
        }
        self
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Zero asks the OS for an ephemeral port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `SocketAddr` parsing.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
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

/// Basic-auth configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Realm sent in `WWW-Authenticate`.
    pub realm: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            realm: DEFAULT_REALM.to_string(),
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
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: BinConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.port, DEFAULT_PORT);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.auth.realm, DEFAULT_REALM);
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: BinConfig = toml::from_str("[listener]\nport = 9001\n").unwrap();
        assert_eq!(config.listener.port, 9001);
        assert_eq!(config.listener.host, "0.0.0.0");
    }

    #[test]
    fn test_port_override() {
        let config = BinConfig::default().with_port(Some(1234));
        assert_eq!(config.listener.port, 1234);

        let config = config.with_port(None);
        assert_eq!(config.listener.port, 1234);
    }

    #[test]
    fn test_bind_address_brackets_ipv6() {
        let listener = ListenerConfig {
            host: "::1".into(),
            port: 80,
        };
        assert_eq!(listener.bind_address(), "[::1]:80");
        assert_eq!(ListenerConfig::default().bind_address(), "0.0.0.0:8000");
    }
}
