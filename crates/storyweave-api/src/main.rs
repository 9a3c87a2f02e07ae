//! Storyweave API server entry point.

use std::error::Error;
use std::sync::Arc;

use storyweave_api::config::ServerConfig;
use storyweave_api::state::AppState;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Storyweave API server");

    // Read configuration from environment.
    let config = ServerConfig::from_env()?;

    // Build the generation backend client.
    let generator = config.story_generator()?;
    tracing::info!(backend_url = %generator.base_url(), "Using story generation backend");

    // Build application state.
    let app_state = AppState::new(Arc::new(generator));

    // Build router.
    // TODO: Replace CorsLayer::permissive() with the presentation layer's origin.
    let app = storyweave_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
