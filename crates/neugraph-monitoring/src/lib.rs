//! Monitoring for the Neugraph service.
//!
//! Currently this covers structured logging; see [`logging`].

pub mod logging;

/// Configuration for initializing the monitoring system
#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    /// Service name attached to the startup log line
    pub service_name: String,
    /// Log level filter (e.g., "info,neugraph=debug"), overridden by `RUST_LOG`
    pub log_filter: String,
    /// Emit JSON lines instead of human readable output
    pub json_logs: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            service_name: "neugraph".to_string(),
            log_filter: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Initialize monitoring system
pub fn init(config: MonitoringConfig) -> anyhow::Result<()> {
    logging::init_logging(&config)
}

// Exported types
pub use crate::logging::LogExt;
