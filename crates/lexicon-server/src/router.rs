use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// HTTP endpoint paths.
pub mod endpoints {
    pub const ADD: &str = "/add";
    pub const DEFINE: &str = "/define/:word";
    pub const REMOVE: &str = "/remove/:word";
    pub const LIST: &str = "/list";
    pub const HEALTH: &str = "/health";
    pub const EXIT: &str = "/exit";
}

/// Build the axum router with all dictionary endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ADD, post(handler::add_handler))
        .route(endpoints::DEFINE, get(handler::define_handler))
        .route(endpoints::REMOVE, delete(handler::remove_handler))
        .route(endpoints::LIST, get(handler::list_handler))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::EXIT, post(handler::exit_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
