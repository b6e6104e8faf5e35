//! Realtime handshake errors.

use super::connection::TransitionError;

/// Reasons a connection attempt is refused.
///
/// All variants are raised before a connection is admitted; none of them
/// leaves state behind in the presence registry.
#[derive(Debug, thiserror::Error)]
pub enum RealtimeError {
    /// Missing, malformed or expired credential, or a payload without email.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The email already has an active session.
    #[error("currently logged in user: {0}")]
    DuplicateSession(String),

    /// Lost an admission race for the same email inside the registry.
    #[error("session conflict for {0}")]
    Conflict(String),

    #[error(transparent)]
    InvalidState(#[from] TransitionError),
}

impl RealtimeError {
    /// Metric label for the handshake outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            RealtimeError::Authentication(_) => "authentication_failed",
            RealtimeError::DuplicateSession(_) => "duplicate_session",
            RealtimeError::Conflict(_) => "conflict",
            RealtimeError::InvalidState(_) => "invalid_state",
        }
    }
}
