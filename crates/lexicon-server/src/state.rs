use std::sync::Arc;

use tokio::sync::Notify;

use lexicon_store::Dictionary;

/// Shared state handed to every handler.
///
/// Holds the process-wide dictionary. Handlers never open their own store;
/// they all go through this one instance and its lock.
#[derive(Clone)]
pub struct AppState {
    pub dictionary: Arc<dyn Dictionary>,
    shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(dictionary: Arc<dyn Dictionary>) -> Self {
        Self {
            dictionary,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Ask the server to stop accepting requests and shut down.
    pub fn request_shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// Resolves once [`request_shutdown`](Self::request_shutdown) has been
    /// called, including if it was called before this future was polled.
    pub async fn shutdown_requested(&self) {
        self.shutdown.notified().await;
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("entry_count", &self.dictionary.len())
            .finish_non_exhaustive()
    }
}
