//! CareLink postal-lookup server.
//!
//! Serves the one HTTP boundary the registry exposes: a pass-through
//! endpoint that resolves an 8-digit postal code into a structured address
//! for front-ends to auto-fill forms with.
//!
//! # Endpoints
//!
//! - `GET /api/postal-code/{code}` - resolved address as JSON
//! - `GET /health` - liveness probe

#![cfg_attr(not(test), forbid(unsafe_code))]

use carelink_registry::config::RegistryConfig;
use carelink_registry::routes;
use carelink_registry::services::PostalResolver;
use carelink_registry::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "carelink_registry=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RegistryConfig::from_env().expect("Failed to load configuration");

    let resolver = PostalResolver::new(&config.resolver).expect("Failed to build resolver client");
    let state = AppState::new(resolver);

    let addr = config.socket_addr();
    let app = routes::router(state);

    tracing::info!(%addr, "postal-lookup server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
