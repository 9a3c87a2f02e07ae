//! A live story session bound to a generation backend.
//!
//! The handle feeds events into the pure reducer, performs the effects it
//! returns and publishes every new snapshot on a `watch` channel. The
//! session mutex is only ever held for the duration of one transition,
//! never across the backend call, so observers can read the pending state
//! while a request is in flight.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storyweave_core::generation::StoryGenerator;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::aggregates::{SessionPhase, SessionSnapshot, StorySession};
use crate::domain::effects::{Effect, GenerationTicket, RequestKind};
use crate::domain::events::SessionEvent;
use crate::domain::transition::{Transition, TransitionError, transition};

/// What happened to a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action changed the session.
    Applied {
        /// Whether the caller should clear its input buffer.
        input_cleared: bool,
        /// State after the action settled.
        snapshot: SessionSnapshot,
    },
    /// The action was rejected and the session is unchanged.
    Ignored {
        /// Why the action was rejected.
        reason: TransitionError,
        /// The unchanged state.
        snapshot: SessionSnapshot,
    },
}

impl ActionOutcome {
    /// Whether the action changed the session.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Whether the caller should clear its input buffer.
    #[must_use]
    pub fn input_cleared(&self) -> bool {
        matches!(
            self,
            Self::Applied {
                input_cleared: true,
                ..
            }
        )
    }

    /// The rejection reason, if the action was ignored.
    #[must_use]
    pub fn ignored_reason(&self) -> Option<TransitionError> {
        match self {
            Self::Applied { .. } => None,
            Self::Ignored { reason, .. } => Some(*reason),
        }
    }

    /// State after the action.
    #[must_use]
    pub fn snapshot(&self) -> &SessionSnapshot {
        match self {
            Self::Applied { snapshot, .. } | Self::Ignored { snapshot, .. } => snapshot,
        }
    }
}

/// One story session and the backend it talks to.
pub struct StorySessionHandle {
    session: Mutex<StorySession>,
    generator: Arc<dyn StoryGenerator>,
    observers: watch::Sender<SessionSnapshot>,
}

impl fmt::Debug for StorySessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorySessionHandle")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl StorySessionHandle {
    /// Creates an empty session that will call `generator`.
    #[must_use]
    pub fn new(generator: Arc<dyn StoryGenerator>) -> Self {
        let (observers, _) = watch::channel(SessionSnapshot::default());
        Self {
            session: Mutex::new(StorySession::new()),
            generator,
            observers,
        }
    }

    /// Returns the current observable state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.lock().phase()
    }

    /// Subscribes to snapshots published after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.observers.subscribe()
    }

    /// Opens the story with `user_text` and waits for the backend to settle.
    pub async fn start_story(&self, user_text: &str) -> ActionOutcome {
        self.dispatch(SessionEvent::StartRequested {
            request_id: Uuid::new_v4(),
            user_text: user_text.to_owned(),
        })
        .await
    }

    /// Adds the user's next turn and waits for the backend to settle.
    pub async fn continue_story(&self, user_text: &str) -> ActionOutcome {
        self.dispatch(SessionEvent::ContinueRequested {
            request_id: Uuid::new_v4(),
            user_text: user_text.to_owned(),
        })
        .await
    }

    /// Discards the story and replaces it with a fresh empty session.
    ///
    /// A request still in flight is left to finish; its result is dropped.
    pub fn reset(&self) -> ActionOutcome {
        match self.apply(SessionEvent::ResetRequested) {
            Ok(effects) => {
                info!("story session reset");
                ActionOutcome::Applied {
                    input_cleared: effects.contains(&Effect::ClearInput),
                    snapshot: self.snapshot(),
                }
            }
            Err(reason) => self.ignored(reason),
        }
    }

    async fn dispatch(&self, event: SessionEvent) -> ActionOutcome {
        let effects = match self.apply(event) {
            Ok(effects) => effects,
            Err(reason) => return self.ignored(reason),
        };

        let mut input_cleared = effects.contains(&Effect::ClearInput);
        for effect in effects {
            if let Effect::RequestGeneration(ticket) = effect {
                let settled = self.request_generation(&ticket).await;
                match self.apply(settled) {
                    Ok(effects) => input_cleared |= effects.contains(&Effect::ClearInput),
                    Err(reason) => {
                        debug!(request_id = %ticket.request_id, "dropping generation result");
                        return self.ignored(reason);
                    }
                }
            }
        }

        ActionOutcome::Applied {
            input_cleared,
            snapshot: self.snapshot(),
        }
    }

    async fn request_generation(&self, ticket: &GenerationTicket) -> SessionEvent {
        info!(request_id = %ticket.request_id, kind = ?ticket.kind, "requesting generation");
        let result = match ticket.kind {
            RequestKind::Start => self.generator.start_story(&ticket.request).await,
            RequestKind::Continue => self.generator.continue_story(&ticket.request).await,
        };

        match result {
            Ok(reply) => SessionEvent::GenerationSucceeded {
                request_id: ticket.request_id,
                reply,
            },
            Err(error) => {
                warn!(
                    request_id = %ticket.request_id,
                    kind = ?ticket.kind,
                    %error,
                    "generation failed, substituting fallback turn"
                );
                SessionEvent::GenerationFailed {
                    request_id: ticket.request_id,
                    error,
                }
            }
        }
    }

    /// Runs one transition under the lock and publishes the result.
    fn apply(&self, event: SessionEvent) -> Result<Vec<Effect>, TransitionError> {
        let mut session = self.lock();
        let Transition {
            session: next,
            effects,
        } = transition(&session, event)?;
        *session = next;
        if effects.contains(&Effect::NotifyObservers) {
            self.observers.send_replace(session.snapshot());
        }
        Ok(effects)
    }

    fn ignored(&self, reason: TransitionError) -> ActionOutcome {
        debug!(%reason, "ignoring story action");
        ActionOutcome::Ignored {
            reason,
            snapshot: self.snapshot(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StorySession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
