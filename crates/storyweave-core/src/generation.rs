//! Story generation backend abstraction.
//!
//! The generation service is an external collaborator reached over a
//! request/response protocol. The session engine only ever talks to it
//! through [`StoryGenerator`], so tests can substitute scripted doubles and
//! production wires in the HTTP client.

use async_trait::async_trait;
use thiserror::Error;

/// One request to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The trimmed user contribution.
    pub user_input: String,
    /// Backend continuity token returned by a previous `start_story` call.
    pub session_token: Option<String>,
}

impl GenerationRequest {
    /// Creates a request without a continuity token.
    #[must_use]
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            session_token: None,
        }
    }

    /// Attaches a continuity token.
    #[must_use]
    pub fn with_session_token(mut self, token: Option<String>) -> Self {
        self.session_token = token;
        self
    }
}

/// A successful reply from the generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReply {
    /// The authoritative story transcript so far.
    pub narrative_so_far: String,
    /// The newly generated continuation.
    pub ai_continuation: String,
    /// Continuity token for follow-up calls, if the backend issues one.
    pub session_token: Option<String>,
}

/// Failure modes of a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request was rejected, timed out at the transport layer, or the
    /// backend answered with a non-success status.
    #[error("generation backend unavailable: {0}")]
    NetworkOrServer(String),

    /// The backend answered but the body is missing expected fields.
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),
}

/// The generation backend contract: one call per endpoint.
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Opens a new story from the user's opening prompt.
    async fn start_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError>;

    /// Continues the backend's current story with the user's contribution.
    async fn continue_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError>;
}
