//! HTTP routes for the postal-lookup server.
//!
//! This is a thin pass-through boundary: one lookup endpoint plus a health
//! probe. The registry use cases themselves are driven through the CLI, not
//! over HTTP.

pub mod postal;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the lookup-server router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/postal-code/{code}", get(postal::lookup))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
