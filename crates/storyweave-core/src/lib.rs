//! Storyweave Core — shared abstractions.
//!
//! This crate defines the traits and types that the session engine, the
//! generation client and the API server all depend on. It contains no
//! infrastructure code.

pub mod command;
pub mod error;
pub mod generation;
