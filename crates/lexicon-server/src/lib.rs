//! HTTP API for the Lexicon dictionary.
//!
//! Exposes one shared [`Dictionary`](lexicon_store::Dictionary) over a small
//! JSON API: add, define, remove and list words, plus health and exit.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{AddRequest, AddResponse, HealthResponse, RemoveResponse};
pub use server::LexiconServer;
pub use state::AppState;
