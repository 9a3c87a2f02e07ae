//! Storyweave — Story Session state machine.
//!
//! Owns the lifecycle of one collaborative story: the alternating turn log,
//! the single in-flight generation request, the backend fallback turns and
//! the sticky theme. The domain layer is a pure reducer; the application
//! layer runs its effects against a `StoryGenerator` and publishes
//! snapshots to observers.

pub mod application;
pub mod domain;
