use anyhow::{Context, Result};
use neugraph_monitoring::{LogExt, MonitoringConfig};
use neugraph_server::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment variables
    let config = ServerConfig::load().context("Failed to load configuration")?;

    // Set up monitoring
    let monitoring_config = MonitoringConfig {
        service_name: "neugraph-server".to_string(),
        log_filter: config.log_level.clone(),
        json_logs: config.json_logs,
    };
    neugraph_monitoring::init(monitoring_config).context("Failed to initialize monitoring")?;

    // A graph that cannot be loaded is fatal; nothing is served
    neugraph_server::run(config)
        .await
        .log_err("Server error")
        .context("Server error")?;

    Ok(())
}
