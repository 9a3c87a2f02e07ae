//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Rejected story actions are not errors (they are reported as ignored
/// outcomes), and backend failures are absorbed into fallback turns, so the
/// only thing that can go wrong at this level is addressing a session that
/// does not exist.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A story session was not found.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),
}
