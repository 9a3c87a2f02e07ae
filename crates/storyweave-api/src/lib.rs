//! Storyweave API — HTTP surface for the presentation layer.
//!
//! Exposes the story session actions (start, continue, reset) and the
//! observable session state over JSON.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router without transport layers.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/stories", routes::story::router())
        .with_state(app_state)
}
