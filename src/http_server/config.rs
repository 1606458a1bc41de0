//! HTTP Server Configuration
//!
//! Bind address, static asset directory, session cookie name and CORS.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 4000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/public` (default: "public")
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Name of the session cookie (default: "sid")
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// CORS allowed origins; empty means no CORS layer
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_cookie_name() -> String {
    "sid".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
            cookie_name: default_cookie_name(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Cookie names must be plain tokens
    pub fn cookie_name_is_valid(&self) -> bool {
        !self.cookie_name.is_empty()
            && self
                .cookie_name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4000);
        assert_eq!(config.cookie_name, "sid");
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..HttpServerConfig::default()
        };
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 4211}"#).unwrap();
        assert_eq!(config.port, 4211);
        assert_eq!(config.public_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_cookie_name_validation() {
        let mut config = HttpServerConfig::default();
        assert!(config.cookie_name_is_valid());
        config.cookie_name = "bad name;".to_string();
        assert!(!config.cookie_name_is_valid());
    }
}
