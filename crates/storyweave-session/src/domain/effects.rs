//! Effects produced by session transitions.

use serde::{Deserialize, Serialize};
use storyweave_core::generation::GenerationRequest;
use uuid::Uuid;

/// Which backend endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// `POST /story/start`
    Start,
    /// `POST /story/continue`
    Continue,
}

/// Everything needed to issue exactly one backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    /// Matches the eventual result back to the session.
    pub request_id: Uuid,
    /// Which endpoint to call.
    pub kind: RequestKind,
    /// Trimmed user text and continuity token.
    pub request: GenerationRequest,
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call the generation backend.
    RequestGeneration(GenerationTicket),
    /// Clear the collaborator's input buffer.
    ClearInput,
    /// Publish the new snapshot to observers.
    NotifyObservers,
}
