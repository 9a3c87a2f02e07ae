//! Pure domain model for story sessions.

pub mod aggregates;
pub mod commands;
pub mod effects;
pub mod events;
pub mod fallback;
pub mod transition;

#[cfg(test)]
mod proptests;
