//! Neugraph Server - HTTP front for the Neugraph graph store
//!
//! This module exports all the components of the Neugraph Server.

/// API module
pub mod api;

/// Server module
pub mod server;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

// Re-export key types
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::NeugraphServer;

/// Load the graph and serve it until shutdown
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    let server = NeugraphServer::open(config).await?;
    server.run().await
}
