//! Routes for story sessions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use storyweave_session::application::command_handlers;
use storyweave_session::application::query_handlers::{self, StoryView};
use storyweave_session::application::session_handle::ActionOutcome;
use storyweave_session::domain::aggregates::SessionSnapshot;
use storyweave_session::domain::commands;
use storyweave_session::domain::transition::TransitionError;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{session_id}/start and /{session_id}/continue.
#[derive(Debug, Deserialize)]
pub struct StoryInputRequest {
    /// The user's text as typed.
    pub user_input: String,
}

/// Response body for POST /.
#[derive(Debug, Serialize)]
pub struct CreatedStoryResponse {
    /// The new session identifier.
    pub session_id: Uuid,
    /// The empty initial state.
    pub state: SessionSnapshot,
}

/// Response body returned after an action is dispatched.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Whether the action changed the session.
    pub accepted: bool,
    /// Why the action was ignored, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_reason: Option<&'static str>,
    /// Whether the client should clear its input buffer.
    pub input_cleared: bool,
    /// State after the action settled.
    pub state: SessionSnapshot,
}

impl From<ActionOutcome> for ActionResponse {
    fn from(outcome: ActionOutcome) -> Self {
        let accepted = outcome.is_applied();
        let input_cleared = outcome.input_cleared();
        let ignored_reason = outcome.ignored_reason().map(TransitionError::code);
        let state = match outcome {
            ActionOutcome::Applied { snapshot, .. } | ActionOutcome::Ignored { snapshot, .. } => {
                snapshot
            }
        };
        Self {
            accepted,
            ignored_reason,
            input_cleared,
            state,
        }
    }
}

/// POST /
#[instrument(skip(state))]
async fn create_story(State(state): State<AppState>) -> (StatusCode, Json<CreatedStoryResponse>) {
    let (session_id, handle) = state.sessions.create();
    info!(%session_id, "created story session");
    (
        StatusCode::CREATED,
        Json(CreatedStoryResponse {
            session_id,
            state: handle.snapshot(),
        }),
    )
}

/// GET /{session_id}
async fn get_story(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StoryView>, ApiError> {
    let view = query_handlers::get_story_by_id(session_id, &state.sessions)?;
    Ok(Json(view))
}

/// DELETE /{session_id}
#[instrument(skip(state))]
async fn delete_story(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(session_id)?;
    info!("removed story session");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /{session_id}/start
#[instrument(skip(state, request))]
async fn start_story(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<StoryInputRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let command = commands::StartStory {
        correlation_id: Uuid::new_v4(),
        session_id,
        user_text: request.user_input,
    };

    let outcome = command_handlers::handle_start_story(&command, &state.sessions).await?;

    Ok(Json(outcome.into()))
}

/// POST /{session_id}/continue
#[instrument(skip(state, request))]
async fn continue_story(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<StoryInputRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let command = commands::ContinueStory {
        correlation_id: Uuid::new_v4(),
        session_id,
        user_text: request.user_input,
    };

    let outcome = command_handlers::handle_continue_story(&command, &state.sessions).await?;

    Ok(Json(outcome.into()))
}

/// POST /{session_id}/reset
#[instrument(skip(state))]
async fn reset_story(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ActionResponse>, ApiError> {
    let command = commands::ResetStory {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    let outcome = command_handlers::handle_reset_story(&command, &state.sessions)?;

    Ok(Json(outcome.into()))
}

/// Returns the router for story sessions.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_story))
        .route("/{session_id}", get(get_story).delete(delete_story))
        .route("/{session_id}/start", post(start_story))
        .route("/{session_id}/continue", post(continue_story))
        .route("/{session_id}/reset", post(reset_story))
}
