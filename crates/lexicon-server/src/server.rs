use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use lexicon_store::{Dictionary, FileDictionary};

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// Dictionary HTTP server.
pub struct LexiconServer {
    config: ServerConfig,
    state: AppState,
}

impl LexiconServer {
    /// Open the dictionary named by `config.data_file` and wrap it in a server.
    pub fn new(config: ServerConfig) -> Self {
        let dictionary = Arc::new(FileDictionary::open(&config.data_file));
        Self::with_dictionary(config, dictionary)
    }

    /// Serve an already-open dictionary.
    pub fn with_dictionary(config: ServerConfig, dictionary: Arc<dyn Dictionary>) -> Self {
        Self {
            config,
            state: AppState::new(dictionary),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Bind `config.bind_addr` and serve until shutdown.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an existing listener until Ctrl-C or `POST /exit`, then flush
    /// the dictionary to disk.
    pub async fn serve_on(self, listener: TcpListener) -> ServerResult<()> {
        info!("lexicon server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal(self.state.clone()))
            .await?;

        info!("server stopped; flushing dictionary");
        self.state.dictionary.flush()?;
        Ok(())
    }
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl-C"),
            Err(e) => {
                warn!(error = %e, "cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {}
        _ = state.shutdown_requested() => info!("shutdown requested"),
    }
}
