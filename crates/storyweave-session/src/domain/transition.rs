//! Pure state transition function for story sessions.
//!
//! Given the same session and event, `transition` always produces the same
//! next session and effects. It performs no I/O: backend calls, input
//! clearing and observer notification are returned as [`Effect`]s for the
//! application layer to run.

use storyweave_core::generation::{GenerationReply, GenerationRequest};
use storyweave_theme::infer_theme;
use thiserror::Error;
use uuid::Uuid;

use super::aggregates::{InFlight, StorySession, Turn};
use super::effects::{Effect, GenerationTicket, RequestKind};
use super::events::SessionEvent;
use super::fallback::{
    CONTINUE_FALLBACK_CONTINUATION, START_FALLBACK_CONTINUATION, START_FALLBACK_THEME,
};

/// Result of an accepted transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The session after the event.
    pub session: StorySession,
    /// Work to perform, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(session: StorySession) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns the generation ticket, if the transition issues a request.
    #[must_use]
    pub fn ticket(&self) -> Option<&GenerationTicket> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::RequestGeneration(ticket) => Some(ticket),
            _ => None,
        })
    }

    /// Whether the transition clears the input buffer.
    #[must_use]
    pub fn clears_input(&self) -> bool {
        self.effects.contains(&Effect::ClearInput)
    }
}

/// Why an event left the session unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The submitted text was empty after trimming.
    #[error("input is empty")]
    EmptyInput,
    /// A start was requested for a story that has already started.
    #[error("story has already started")]
    AlreadyStarted,
    /// A continuation was requested before the story started.
    #[error("story has not started")]
    NotStarted,
    /// Another generation request is still in flight.
    #[error("a generation request is already in flight")]
    RequestInFlight,
    /// A generation result arrived for a request that is no longer current.
    #[error("generation result does not match the in-flight request")]
    StaleResponse,
}

impl TransitionError {
    /// Machine-readable reason code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::AlreadyStarted => "already_started",
            Self::NotStarted => "not_started",
            Self::RequestInFlight => "request_in_flight",
            Self::StaleResponse => "stale_response",
        }
    }
}

/// Applies `event` to `session`.
///
/// # Errors
///
/// Returns a [`TransitionError`] when the event is not valid in the current
/// state. The caller treats this as a no-op: the session is unchanged and no
/// request is issued.
pub fn transition(
    session: &StorySession,
    event: SessionEvent,
) -> Result<Transition, TransitionError> {
    match event {
        SessionEvent::StartRequested {
            request_id,
            user_text,
        } => request_start(session, request_id, user_text),
        SessionEvent::ContinueRequested {
            request_id,
            user_text,
        } => request_continue(session, request_id, user_text),
        SessionEvent::GenerationSucceeded { request_id, reply } => {
            let in_flight = current_request(session, request_id)?;
            Ok(match in_flight.kind {
                RequestKind::Start => start_succeeded(in_flight, reply),
                RequestKind::Continue => continue_succeeded(session, reply),
            })
        }
        SessionEvent::GenerationFailed { request_id, .. } => {
            let in_flight = current_request(session, request_id)?;
            Ok(match in_flight.kind {
                RequestKind::Start => start_failed(in_flight),
                RequestKind::Continue => continue_failed(session),
            })
        }
        SessionEvent::ResetRequested => Ok(Transition::new(StorySession::new())
            .with_effect(Effect::ClearInput)
            .with_effect(Effect::NotifyObservers)),
    }
}

fn trimmed_input(user_text: &str) -> Result<&str, TransitionError> {
    let trimmed = user_text.trim();
    if trimmed.is_empty() {
        Err(TransitionError::EmptyInput)
    } else {
        Ok(trimmed)
    }
}

fn request_start(
    session: &StorySession,
    request_id: Uuid,
    user_text: String,
) -> Result<Transition, TransitionError> {
    let prompt = trimmed_input(&user_text)?.to_owned();
    if session.is_pending() {
        return Err(TransitionError::RequestInFlight);
    }
    if session.started {
        return Err(TransitionError::AlreadyStarted);
    }

    let mut next = session.clone();
    next.in_flight = Some(InFlight {
        request_id,
        kind: RequestKind::Start,
        user_text,
    });

    Ok(Transition::new(next)
        .with_effect(Effect::NotifyObservers)
        .with_effect(Effect::RequestGeneration(GenerationTicket {
            request_id,
            kind: RequestKind::Start,
            request: GenerationRequest::new(prompt),
        })))
}

fn request_continue(
    session: &StorySession,
    request_id: Uuid,
    user_text: String,
) -> Result<Transition, TransitionError> {
    let prompt = trimmed_input(&user_text)?.to_owned();
    if session.is_pending() {
        return Err(TransitionError::RequestInFlight);
    }
    if !session.started {
        return Err(TransitionError::NotStarted);
    }

    // The user turn is committed before the request goes out.
    let mut next = session.clone();
    next.turns.push(Turn::user(user_text.clone()));
    next.in_flight = Some(InFlight {
        request_id,
        kind: RequestKind::Continue,
        user_text,
    });
    let request =
        GenerationRequest::new(prompt).with_session_token(session.backend_session.clone());

    Ok(Transition::new(next)
        .with_effect(Effect::ClearInput)
        .with_effect(Effect::NotifyObservers)
        .with_effect(Effect::RequestGeneration(GenerationTicket {
            request_id,
            kind: RequestKind::Continue,
            request,
        })))
}

fn current_request(
    session: &StorySession,
    request_id: Uuid,
) -> Result<&InFlight, TransitionError> {
    session
        .in_flight
        .as_ref()
        .filter(|in_flight| in_flight.request_id == request_id)
        .ok_or(TransitionError::StaleResponse)
}

fn opened(in_flight: &InFlight, continuation: &str) -> StorySession {
    StorySession {
        started: true,
        turns: vec![
            Turn::user(in_flight.user_text.clone()),
            Turn::narrator(continuation),
        ],
        ..StorySession::new()
    }
}

fn start_succeeded(in_flight: &InFlight, reply: GenerationReply) -> Transition {
    let mut next = opened(in_flight, &reply.ai_continuation);
    next.theme = infer_theme(&reply.ai_continuation);
    next.narrative_so_far = reply.narrative_so_far;
    next.backend_session = reply.session_token;

    Transition::new(next)
        .with_effect(Effect::ClearInput)
        .with_effect(Effect::NotifyObservers)
}

fn start_failed(in_flight: &InFlight) -> Transition {
    let mut next = opened(in_flight, START_FALLBACK_CONTINUATION);
    next.theme = START_FALLBACK_THEME;

    Transition::new(next)
        .with_effect(Effect::ClearInput)
        .with_effect(Effect::NotifyObservers)
}

fn continue_succeeded(session: &StorySession, reply: GenerationReply) -> Transition {
    let mut next = session.clone();
    next.in_flight = None;
    next.theme = session.theme.absorb(infer_theme(&reply.ai_continuation));
    next.turns.push(Turn::narrator(reply.ai_continuation));
    next.narrative_so_far = reply.narrative_so_far;
    if reply.session_token.is_some() {
        next.backend_session = reply.session_token;
    }

    Transition::new(next).with_effect(Effect::NotifyObservers)
}

fn continue_failed(session: &StorySession) -> Transition {
    let mut next = session.clone();
    next.in_flight = None;
    next.turns.push(Turn::narrator(CONTINUE_FALLBACK_CONTINUATION));

    Transition::new(next).with_effect(Effect::NotifyObservers)
}
