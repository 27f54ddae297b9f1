//! mockdrill-server - HTTP API for the interview session engine
//!
//! This crate provides the server infrastructure that owns the SessionManager
//! and the question bank. Handlers are thin: they translate HTTP requests into
//! core operations and core errors into HTTP statuses.

mod error;
pub mod http;
mod state;

use tokio::net::TcpListener;

pub use error::ServerError;
pub use http::create_router;
pub use state::AppState;

use std::sync::Arc;

/// The main mockdrill server
pub struct MockdrillServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl MockdrillServer {
    /// Create a new server with default state
    pub fn new(config: ServerConfig) -> Self {
        let state = match &config.bank_url {
            Some(url) => Arc::new(AppState::with_remote_bank(url.clone())),
            None => Arc::new(AppState::new()),
        };
        Self { config, state }
    }

    /// Create a server with custom state (for testing)
    pub fn with_state(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the shared application state
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Run the server, binding to the configured address
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.clone(),
                source: e,
            })?;

        tracing::info!("mockdrill server listening on {}", addr);

        let router = create_router(self.state);
        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL of an external question-bank API, if any
    pub bank_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8321,
            bank_url: None,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with the specified host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            bank_url: None,
        }
    }

    /// Returns the socket address string (e.g., "0.0.0.0:8321")
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
