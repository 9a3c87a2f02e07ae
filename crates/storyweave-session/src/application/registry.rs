//! Independent story sessions addressed by id.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use storyweave_core::error::DomainError;
use storyweave_core::generation::StoryGenerator;
use uuid::Uuid;

use crate::application::session_handle::StorySessionHandle;

/// Holds every live session. Sessions share the generator but no state.
pub struct SessionRegistry {
    generator: Arc<dyn StoryGenerator>,
    sessions: RwLock<HashMap<Uuid, Arc<StorySessionHandle>>>,
}

impl fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.len())
            .finish_non_exhaustive()
    }
}

impl SessionRegistry {
    /// Creates an empty registry whose sessions call `generator`.
    #[must_use]
    pub fn new(generator: Arc<dyn StoryGenerator>) -> Self {
        Self {
            generator,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a new empty session and returns its id and handle.
    pub fn create(&self) -> (Uuid, Arc<StorySessionHandle>) {
        let session_id = Uuid::new_v4();
        let handle = Arc::new(StorySessionHandle::new(Arc::clone(&self.generator)));
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id, Arc::clone(&handle));
        (session_id, handle)
    }

    /// Looks up a session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if no session has this id.
    pub fn get(&self, session_id: Uuid) -> Result<Arc<StorySessionHandle>, DomainError> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&session_id)
            .cloned()
            .ok_or(DomainError::SessionNotFound(session_id))
    }

    /// Drops a session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if no session has this id.
    pub fn remove(&self, session_id: Uuid) -> Result<(), DomainError> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session_id)
            .map(|_| ())
            .ok_or(DomainError::SessionNotFound(session_id))
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no sessions are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyweave_test_support::{ScriptedStoryGenerator, story_reply};

    fn registry() -> SessionRegistry {
        SessionRegistry::new(Arc::new(ScriptedStoryGenerator::new(vec![Ok(
            story_reply("story", "ai"),
        )])))
    }

    #[test]
    fn test_create_then_get_returns_same_session() {
        let registry = registry();

        let (session_id, handle) = registry.create();

        let found = registry.get(session_id).unwrap();
        assert!(Arc::ptr_eq(&handle, &found));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_unknown_session_returns_not_found() {
        let registry = registry();
        let session_id = Uuid::new_v4();

        match registry.get(session_id).unwrap_err() {
            DomainError::SessionNotFound(id) => assert_eq!(id, session_id),
        }
    }

    #[test]
    fn test_remove_drops_session() {
        let registry = registry();
        let (session_id, _) = registry.create();

        registry.remove(session_id).unwrap();

        assert!(registry.is_empty());
        assert!(registry.remove(session_id).is_err());
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_state() {
        // Arrange
        let registry = registry();
        let (_, first) = registry.create();
        let (_, second) = registry.create();

        // Act
        first.start_story("begin").await;

        // Assert
        assert!(first.snapshot().started);
        assert!(!second.snapshot().started);
    }
}
