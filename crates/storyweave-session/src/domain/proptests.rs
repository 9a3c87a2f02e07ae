//! Property-based tests for the session reducer.
//!
//! These drive arbitrary event sequences through `transition` and check
//! that the session invariants hold after every step.

use proptest::prelude::*;
use storyweave_core::generation::GenerationError;
use storyweave_theme::Theme;
use uuid::Uuid;

use super::aggregates::{Role, StorySession};
use super::events::SessionEvent;
use super::transition::{TransitionError, transition};
use storyweave_test_support::story_reply;

// ============================================================================
// Generators
// ============================================================================

#[derive(Debug, Clone)]
enum Step {
    Start(String),
    Continue(String),
    Succeed(String),
    Fail,
    Reset,
}

fn arb_user_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_owned()),
        "[a-z ]{1,30}",
    ]
}

fn arb_ai_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("The dragon sleeps beneath the castle.".to_owned()),
        Just("A robot scans the hologram with a laser.".to_owned()),
        Just("The door creaks open.".to_owned()),
        "[a-z ]{0,40}",
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => arb_user_text().prop_map(Step::Start),
        5 => arb_user_text().prop_map(Step::Continue),
        4 => arb_ai_text().prop_map(Step::Succeed),
        2 => Just(Step::Fail),
        1 => Just(Step::Reset),
    ]
}

fn event_for(session: &StorySession, step: Step) -> SessionEvent {
    let current = session
        .in_flight()
        .map_or_else(Uuid::new_v4, |in_flight| in_flight.request_id);
    match step {
        Step::Start(user_text) => SessionEvent::StartRequested {
            request_id: Uuid::new_v4(),
            user_text,
        },
        Step::Continue(user_text) => SessionEvent::ContinueRequested {
            request_id: Uuid::new_v4(),
            user_text,
        },
        Step::Succeed(ai) => SessionEvent::GenerationSucceeded {
            request_id: current,
            reply: story_reply("canonical story", &ai),
        },
        Step::Fail => SessionEvent::GenerationFailed {
            request_id: current,
            error: GenerationError::NetworkOrServer("backend unavailable".to_owned()),
        },
        Step::Reset => SessionEvent::ResetRequested,
    }
}

fn roles_alternate(session: &StorySession) -> bool {
    session.turns().iter().enumerate().all(|(index, turn)| {
        let expected = if index % 2 == 0 {
            Role::User
        } else {
            Role::Narrator
        };
        turn.role() == expected
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_step(steps in prop::collection::vec(arb_step(), 0..40)) {
        let mut session = StorySession::new();
        for step in steps {
            let is_reset = matches!(step, Step::Reset);
            let event = event_for(&session, step);
            match transition(&session, event) {
                Ok(result) => {
                    let next = result.session;
                    prop_assert!(roles_alternate(&next));
                    if !is_reset {
                        // Started never reverts, and an established theme
                        // never falls back to neutral.
                        prop_assert!(next.is_started() || !session.is_started());
                        if !session.theme().is_neutral() {
                            prop_assert!(!next.theme().is_neutral());
                        }
                    }
                    prop_assert_eq!(next.snapshot().pending, next.in_flight().is_some());
                    session = next;
                }
                Err(_) => {
                    // Ignored events never reach the session.
                }
            }
        }
    }

    #[test]
    fn prop_settled_cycles_produce_two_turns_each(
        outcomes in prop::collection::vec(any::<bool>(), 0..15),
        opening_succeeds in any::<bool>(),
    ) {
        let mut session = StorySession::new();
        let step = if opening_succeeds {
            Step::Succeed("Once upon a time.".to_owned())
        } else {
            Step::Fail
        };
        for event_step in [Step::Start("begin".to_owned()), step] {
            let event = event_for(&session, event_step);
            session = transition(&session, event).unwrap().session;
        }

        for succeeds in &outcomes {
            let event = event_for(&session, Step::Continue("onward".to_owned()));
            session = transition(&session, event).unwrap().session;
            let settle = if *succeeds {
                Step::Succeed("and then".to_owned())
            } else {
                Step::Fail
            };
            let event = event_for(&session, settle);
            session = transition(&session, event).unwrap().session;
        }

        prop_assert_eq!(session.turns().len(), 2 + 2 * outcomes.len());
        prop_assert!(roles_alternate(&session));
        prop_assert!(!session.is_pending());
    }

    #[test]
    fn prop_second_submission_while_pending_is_ignored(text in "[a-z]{1,20}") {
        let mut session = StorySession::new();
        let event = event_for(&session, Step::Start("begin".to_owned()));
        session = transition(&session, event).unwrap().session;
        let event = event_for(&session, Step::Succeed("ai".to_owned()));
        session = transition(&session, event).unwrap().session;
        let event = event_for(&session, Step::Continue("first".to_owned()));
        let pending = transition(&session, event).unwrap().session;

        let result = transition(&pending, event_for(&pending, Step::Continue(text)));

        prop_assert_eq!(result.unwrap_err(), TransitionError::RequestInFlight);
    }

    #[test]
    fn prop_reset_always_yields_initial_state(steps in prop::collection::vec(arb_step(), 0..20)) {
        let mut session = StorySession::new();
        for step in steps {
            let event = event_for(&session, step);
            if let Ok(result) = transition(&session, event) {
                session = result.session;
            }
        }

        let reset = transition(&session, SessionEvent::ResetRequested).unwrap().session;

        prop_assert_eq!(reset.snapshot(), StorySession::new().snapshot());
        prop_assert_eq!(reset.theme(), Theme::Neutral);
    }
}
