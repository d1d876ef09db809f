pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contract::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/contracts", post(handlers::handle_generate))
        .route("/api/v1/contracts/render", post(handlers::handle_render))
        .route("/api/v1/contracts/sections", get(handlers::handle_sections))
        .with_state(state)
}
