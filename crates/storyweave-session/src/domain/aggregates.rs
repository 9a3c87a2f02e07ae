//! Aggregate root for a story session.

use serde::{Deserialize, Serialize};
use storyweave_theme::Theme;
use uuid::Uuid;

use super::effects::RequestKind;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human collaborator.
    User,
    /// The generation backend (or a fallback standing in for it).
    Narrator,
}

/// One contribution to the story. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    /// A turn written by the user.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// A turn written by the narrator.
    #[must_use]
    pub fn narrator(content: impl Into<String>) -> Self {
        Self {
            role: Role::Narrator,
            content: content.into(),
        }
    }

    /// Returns the author role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text of the turn.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// The generation request currently awaiting a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight {
    /// Identifies the request so late results can be recognised.
    pub request_id: Uuid,
    /// Which backend endpoint was called.
    pub kind: RequestKind,
    /// The user's text as submitted, kept for the opening turn of a start.
    pub user_text: String,
}

/// Coarse lifecycle state derived from the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Not started and nothing in flight.
    Empty,
    /// Started and ready for the next user turn.
    Active,
    /// A generation request is in flight.
    AwaitingResponse,
}

/// Observable state handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Whether the first exchange has completed.
    pub started: bool,
    /// Authoritative transcript last returned by the backend.
    pub narrative_so_far: String,
    /// The display turn log, oldest first.
    pub turns: Vec<Turn>,
    /// Whether a generation request is in flight.
    pub pending: bool,
    /// Current inferred theme.
    pub theme: Theme,
}

/// The aggregate root for a story session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorySession {
    pub(crate) started: bool,
    pub(crate) narrative_so_far: String,
    pub(crate) turns: Vec<Turn>,
    pub(crate) in_flight: Option<InFlight>,
    pub(crate) theme: Theme,
    pub(crate) backend_session: Option<String>,
}

impl StorySession {
    /// Creates an empty, unstarted session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the first exchange has completed.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether a generation request is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The in-flight request, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    /// Authoritative transcript last returned by the backend.
    #[must_use]
    pub fn narrative_so_far(&self) -> &str {
        &self.narrative_so_far
    }

    /// The display turn log, oldest first.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Current inferred theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Continuity token issued by the backend on start, if any.
    #[must_use]
    pub fn backend_session(&self) -> Option<&str> {
        self.backend_session.as_deref()
    }

    /// Derives the lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.is_pending() {
            SessionPhase::AwaitingResponse
        } else if self.started {
            SessionPhase::Active
        } else {
            SessionPhase::Empty
        }
    }

    /// Captures the observable state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            started: self.started,
            narrative_so_far: self.narrative_so_far.clone(),
            turns: self.turns.clone(),
            pending: self.is_pending(),
            theme: self.theme,
        }
    }
}
