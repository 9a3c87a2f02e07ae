//! HTTP client for the story generation backend.
//!
//! Speaks the backend's two-endpoint JSON protocol and classifies every
//! failure into the `GenerationError` taxonomy. It never retries.

pub mod http_story_generator;
pub mod wire;

pub use http_story_generator::{ClientBuildError, HttpStoryGenerator};
