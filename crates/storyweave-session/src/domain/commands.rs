//! Commands for the story session context.

use storyweave_core::command::Command;
use uuid::Uuid;

/// Command to open a story with the user's first prompt.
#[derive(Debug, Clone)]
pub struct StartStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to start.
    pub session_id: Uuid,
    /// The opening prompt as typed.
    pub user_text: String,
}

impl Command for StartStory {
    fn command_type(&self) -> &'static str {
        "story.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add the user's next turn to a started story.
#[derive(Debug, Clone)]
pub struct ContinueStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to continue.
    pub session_id: Uuid,
    /// The user's contribution as typed.
    pub user_text: String,
}

impl Command for ContinueStory {
    fn command_type(&self) -> &'static str {
        "story.continue"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to discard the story and start over.
#[derive(Debug, Clone)]
pub struct ResetStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to reset.
    pub session_id: Uuid,
}

impl Command for ResetStory {
    fn command_type(&self) -> &'static str {
        "story.reset"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
