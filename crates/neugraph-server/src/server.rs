//! Main Neugraph Server implementation

use std::sync::Arc;

use neugraph_monitoring::LogExt;
use neugraph_store::{GraphStore, JsonFilePersistence};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// HTTP server around one graph store
#[derive(Debug, Clone)]
pub struct NeugraphServer {
    /// Configuration
    pub config: ServerConfig,

    /// The live graph
    store: Arc<GraphStore>,
}

impl NeugraphServer {
    pub fn new(config: ServerConfig, store: Arc<GraphStore>) -> Self {
        Self { config, store }
    }

    /// Open the store backed by the configured graph file.
    ///
    /// Fails if the file cannot be read, decoded or validated.
    pub async fn open(config: ServerConfig) -> ServerResult<Self> {
        let persistence = Arc::new(JsonFilePersistence::new(&config.graph_file));
        let store = GraphStore::open(persistence).await?;

        info!(
            "Loaded {} nodes and {} links from {}",
            store.node_count().await,
            store.link_count().await,
            config.graph_file.display()
        );
        Ok(Self::new(config, Arc::new(store)))
    }

    pub fn store(&self) -> Arc<GraphStore> {
        self.store.clone()
    }

    /// Run the server until Ctrl-C
    pub async fn run(self) -> ServerResult<()> {
        let app = crate::api::build_router(self.store.clone(), self.config.static_dir.as_deref());

        let listener = TcpListener::bind((self.config.bind_address.as_str(), self.config.port))
            .await
            .map_err(|source| ServerError::Bind {
                address: format!("{}:{}", self.config.bind_address, self.config.port),
                source,
            })?;
        info!("Server starting on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .log_ok("Server stopped")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
