//! Shared application state.

use std::sync::Arc;

use storyweave_core::generation::StoryGenerator;
use storyweave_session::application::registry::SessionRegistry;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Live story sessions.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Create new application state whose sessions call `generator`.
    #[must_use]
    pub fn new(generator: Arc<dyn StoryGenerator>) -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::new(generator)),
        }
    }
}
