//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(generate))
        .route("/api/decks", get(list_decks).delete(reset_decks))
        .route(
            "/api/decks/:id",
            get(get_deck).put(save_deck).delete(delete_deck),
        )
        .route("/api/backup", get(export_backup).post(import_backup))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
