//! HTTP server hosting the include graph visualization

pub mod assets;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use anyhow::Context;
use incgraph_core::GraphDocument;

/// Where to listen.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Address of the visualization page.
    pub fn page_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

/// Shared, read-only state handed to every handler.
#[derive(Debug)]
pub struct ServerState {
    pub document: GraphDocument,
}

impl ServerState {
    pub fn new(document: GraphDocument) -> Self {
        Self { document }
    }
}

pub struct IncGraphServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl IncGraphServer {
    pub fn new(document: GraphDocument, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(ServerState::new(document)),
            config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = (self.config.host.as_str(), self.config.port);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("cannot bind {}:{}", self.config.host, self.config.port))?;
        tracing::info!("Serving at {}", self.config.page_url());

        let app = router::create_router(self.state);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
