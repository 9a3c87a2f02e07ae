//! Query handlers for the story session context.

use serde::Serialize;
use storyweave_core::error::DomainError;
use uuid::Uuid;

use crate::application::registry::SessionRegistry;
use crate::domain::aggregates::{SessionPhase, SessionSnapshot};

/// Read-only view of a story session.
#[derive(Debug, Serialize)]
pub struct StoryView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    /// Observable session state.
    pub state: SessionSnapshot,
}

/// Retrieves a story session by id.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no session has this id.
pub fn get_story_by_id(
    session_id: Uuid,
    registry: &SessionRegistry,
) -> Result<StoryView, DomainError> {
    let handle = registry.get(session_id)?;
    Ok(StoryView {
        session_id,
        phase: handle.phase(),
        state: handle.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storyweave_core::error::DomainError;
    use storyweave_test_support::FailingStoryGenerator;
    use uuid::Uuid;

    use crate::application::query_handlers::get_story_by_id;
    use crate::application::registry::SessionRegistry;
    use crate::domain::aggregates::SessionPhase;

    #[tokio::test]
    async fn test_get_story_by_id_returns_view_with_state() {
        // Arrange
        let registry = SessionRegistry::new(Arc::new(FailingStoryGenerator::unreachable()));
        let (session_id, handle) = registry.create();
        handle.start_story("begin").await;

        // Act
        let view = get_story_by_id(session_id, &registry).unwrap();

        // Assert
        assert_eq!(view.session_id, session_id);
        assert_eq!(view.phase, SessionPhase::Active);
        assert!(view.state.started);
        assert_eq!(view.state.turns.len(), 2);
    }

    #[test]
    fn test_get_story_by_id_returns_not_found_for_unknown_id() {
        let registry = SessionRegistry::new(Arc::new(FailingStoryGenerator::unreachable()));
        let session_id = Uuid::new_v4();

        match get_story_by_id(session_id, &registry).unwrap_err() {
            DomainError::SessionNotFound(id) => assert_eq!(id, session_id),
        }
    }
}
