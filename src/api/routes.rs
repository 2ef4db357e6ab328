use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route("/catalog", get(handlers::catalog))
        .route("/search", get(handlers::search_get))
        .route("/search", post(handlers::search_post))
        .route("/detail", get(handlers::detail))
        // Assets
        .route("/static/*path", get(handlers::serve_static))
        // Internal
        .route("/_internal/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
