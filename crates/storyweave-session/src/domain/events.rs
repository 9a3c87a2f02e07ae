//! Inputs to the session reducer.

use storyweave_core::generation::{GenerationError, GenerationReply};
use uuid::Uuid;

/// Something that happened to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user asked to open the story.
    StartRequested {
        /// Identifier for the generation request this may issue.
        request_id: Uuid,
        /// The opening prompt as typed.
        user_text: String,
    },
    /// The user submitted their next turn.
    ContinueRequested {
        /// Identifier for the generation request this may issue.
        request_id: Uuid,
        /// The contribution as typed.
        user_text: String,
    },
    /// The backend answered the request.
    GenerationSucceeded {
        /// The request being answered.
        request_id: Uuid,
        /// The backend's reply.
        reply: GenerationReply,
    },
    /// The backend call failed in any way.
    GenerationFailed {
        /// The request that failed.
        request_id: Uuid,
        /// Why it failed. The session substitutes a fallback turn either way.
        error: GenerationError,
    },
    /// The user discarded the story.
    ResetRequested,
}
