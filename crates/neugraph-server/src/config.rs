//! Configuration for the Neugraph Server
//!
//! This module contains the configuration types and loading functionality.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::{ServerError, ServerResult};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub bind_address: String,

    /// Backing JSON file, read once at startup and rewritten on every mutation
    #[serde(default = "default_graph_file")]
    pub graph_file: PathBuf,

    /// Directory with the front-end UI; `None` disables static serving
    #[serde(default = "default_static_dir")]
    pub static_dir: Option<PathBuf>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub json_logs: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_graph_file() -> PathBuf {
    PathBuf::from("neuData.json")
}

fn default_static_dir() -> Option<PathBuf> {
    Some(PathBuf::from("static"))
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn load() -> ServerResult<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn load_from<F>(lookup: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with defaults
        let mut config = Self::default();

        if let Some(port) = lookup("SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.port = port;
            } else {
                warn!("Invalid SERVER_PORT value: {}", port);
            }
        }

        if let Some(host) = lookup("SERVER_HOST") {
            config.bind_address = host;
        }

        if let Some(graph_file) = lookup("GRAPH_FILE") {
            config.graph_file = PathBuf::from(graph_file);
        }

        if let Some(static_dir) = lookup("STATIC_DIR") {
            config.static_dir = if static_dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(static_dir))
            };
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            config.log_level = log_level;
        }

        if let Some(json_logs) = lookup("LOG_JSON") {
            config.json_logs = json_logs.to_lowercase() == "true" || json_logs == "1";
        }

        // Validate required fields
        if config.graph_file.as_os_str().is_empty() {
            return Err(ServerError::ConfigError(
                "Graph file path is required".to_string(),
            ));
        }

        if config.static_dir.is_none() {
            warn!("No STATIC_DIR configured - front-end UI will not be served");
        }

        info!("Loaded server configuration");
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_host(),
            graph_file: default_graph_file(),
            static_dir: default_static_dir(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = ServerConfig::load_from(lookup_in(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.graph_file, PathBuf::from("neuData.json"));
        assert_eq!(config.static_dir, Some(PathBuf::from("static")));
        assert!(!config.json_logs);
    }

    #[test]
    fn test_variables_override_defaults() {
        let config = ServerConfig::load_from(lookup_in(&[
            ("SERVER_PORT", "9090"),
            ("GRAPH_FILE", "/var/lib/neugraph/graph.json"),
            ("STATIC_DIR", ""),
            ("LOG_JSON", "true"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.graph_file, PathBuf::from("/var/lib/neugraph/graph.json"));
        assert_eq!(config.static_dir, None);
        assert!(config.json_logs);
    }

    #[test]
    fn test_invalid_port_keeps_default() {
        let config = ServerConfig::load_from(lookup_in(&[("SERVER_PORT", "eighty")])).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_empty_graph_file_is_rejected() {
        let result = ServerConfig::load_from(lookup_in(&[("GRAPH_FILE", "")]));
        assert!(matches!(result, Err(ServerError::ConfigError(_))));
    }
}
