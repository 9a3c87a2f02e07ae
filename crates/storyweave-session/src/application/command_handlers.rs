//! Command handlers for the story session context.
//!
//! Each handler resolves the target session through the registry and
//! dispatches the action to it. Rejected actions come back as
//! [`ActionOutcome::Ignored`]; only an unknown session is an error.

use storyweave_core::command::Command;
use storyweave_core::error::DomainError;
use tracing::{info, instrument};

use crate::application::registry::SessionRegistry;
use crate::application::session_handle::ActionOutcome;
use crate::domain::commands::{ContinueStory, ResetStory, StartStory};

/// Handles the `StartStory` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session does not exist.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub async fn handle_start_story(
    command: &StartStory,
    registry: &SessionRegistry,
) -> Result<ActionOutcome, DomainError> {
    let handle = registry.get(command.session_id)?;
    info!(command_type = command.command_type(), "handling command");
    Ok(handle.start_story(&command.user_text).await)
}

/// Handles the `ContinueStory` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session does not exist.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub async fn handle_continue_story(
    command: &ContinueStory,
    registry: &SessionRegistry,
) -> Result<ActionOutcome, DomainError> {
    let handle = registry.get(command.session_id)?;
    info!(command_type = command.command_type(), "handling command");
    Ok(handle.continue_story(&command.user_text).await)
}

/// Handles the `ResetStory` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session does not exist.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub fn handle_reset_story(
    command: &ResetStory,
    registry: &SessionRegistry,
) -> Result<ActionOutcome, DomainError> {
    let handle = registry.get(command.session_id)?;
    info!(command_type = command.command_type(), "handling command");
    Ok(handle.reset())
}
