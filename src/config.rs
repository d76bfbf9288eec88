//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Path to the exported classifier artifact
    pub model_path: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            model_path: "models/logistic_regression_model.json".to_string(),
            log_format: LogFormat::Text,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: lookup("MODEL_PATH").unwrap_or(defaults.model_path),

            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => defaults.log_format,
            },

            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Socket address to listen on
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, 8000);
        assert_eq!(config.model_path, "models/logistic_regression_model.json");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9100"),
            ("MODEL_PATH", "/srv/models/forest.json"),
            ("LOG_FORMAT", "JSON"),
            ("ENVIRONMENT", "production"),
        ]));

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9100");
        assert_eq!(config.model_path, "/srv/models/forest.json");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.is_production());
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "eighty"), ("HOST", "nowhere")]));
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }
}
