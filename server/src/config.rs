//! Runtime configuration read from the environment.
//!
//! | variable           | default                 |
//! |--------------------|-------------------------|
//! | `HOST`             | `0.0.0.0`               |
//! | `PORT`             | `3000`                  |
//! | `API_UPSTREAM`     | `http://127.0.0.1:8000` |
//! | `REQUEST_LIMIT_MB` | `10`                    |

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPSTREAM: &str = "http://127.0.0.1:8000";
const DEFAULT_LIMIT_MB: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    Port(String),

    #[error("REQUEST_LIMIT_MB must be a positive whole number, got {0:?}")]
    RequestLimit(String),

    #[error("API_UPSTREAM must be an http:// or https:// URL, got {0:?}")]
    Upstream(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Backend base URL without a trailing slash.
    pub api_upstream: String,
    /// Largest accepted request body in bytes.
    pub request_limit: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::Port(raw)),
            },
            None => DEFAULT_PORT,
        };

        let api_upstream = get("API_UPSTREAM").unwrap_or_else(|| DEFAULT_UPSTREAM.to_string());
        if !(api_upstream.starts_with("http://") || api_upstream.starts_with("https://")) {
            return Err(ConfigError::Upstream(api_upstream));
        }
        let api_upstream = api_upstream.trim_end_matches('/').to_string();

        let limit_mb = match get("REQUEST_LIMIT_MB") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(mb) if mb > 0 => mb,
                _ => return Err(ConfigError::RequestLimit(raw)),
            },
            None => DEFAULT_LIMIT_MB,
        };

        Ok(Self {
            host,
            port,
            api_upstream,
            request_limit: limit_mb * 1024 * 1024,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_upstream, "http://127.0.0.1:8000");
        assert_eq!(config.request_limit, 10 * 1024 * 1024);
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let config = config(&[
            ("HOST", " 127.0.0.1 "),
            ("PORT", "8080"),
            ("API_UPSTREAM", "https://cards.example.com/api/"),
            ("REQUEST_LIMIT_MB", "25"),
        ])
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_upstream, "https://cards.example.com/api");
        assert_eq!(config.request_limit, 25 * 1024 * 1024);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(config(&[("PORT", "0")]), Err(ConfigError::Port("0".into())));
        assert_eq!(config(&[("PORT", "http")]), Err(ConfigError::Port("http".into())));
        assert_eq!(
            config(&[("REQUEST_LIMIT_MB", "-1")]),
            Err(ConfigError::RequestLimit("-1".into()))
        );
        assert_eq!(
            config(&[("API_UPSTREAM", "localhost:8000")]),
            Err(ConfigError::Upstream("localhost:8000".into()))
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config(&[("PORT", "  "), ("HOST", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
    }
}
