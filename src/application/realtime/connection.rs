//! Per-connection lifecycle.
//!
//! ```text
//! Connecting -> Authenticating -> Rejected
//!                              -> Admitted -> Active -> Disconnected
//!                                          -> Disconnected
//! ```
//!
//! `Rejected` and `Disconnected` are terminal. Client events are only
//! processed while `Active`.

use std::fmt;

use crate::domain::ConnectionId;

/// Lifecycle state of one transport connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Authenticating,
    Rejected,
    Admitted,
    Active,
    Disconnected,
}

impl ConnectionState {
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::*;

        matches!(
            (self, next),
            (Connecting, Authenticating)
                | (Authenticating, Rejected)
                | (Authenticating, Admitted)
                | (Admitted, Active)
                | (Admitted, Disconnected)
                | (Active, Disconnected)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Authenticating => "authenticating",
            ConnectionState::Rejected => "rejected",
            ConnectionState::Admitted => "admitted",
            ConnectionState::Active => "active",
            ConnectionState::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attempted move between two states the lifecycle does not connect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal connection transition {from} -> {to}")]
pub struct TransitionError {
    pub from: ConnectionState,
    pub to: ConnectionState,
}

/// A transport connection as seen by the realtime core.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    state: ConnectionState,
}

impl Connection {
    /// New connection with a generated id, in `Connecting`.
    pub fn new() -> Self {
        Self::with_id(ConnectionId::generate())
    }

    pub fn with_id(id: ConnectionId) -> Self {
        Self {
            id,
            state: ConnectionState::Connecting,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ConnectionState::Active
    }

    pub fn transition(&mut self, next: ConnectionState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(next) {
            return Err(TransitionError {
                from: self.state,
                to: next,
            });
        }

        tracing::trace!(
            connection_id = %self.id,
            from = %self.state,
            to = %next,
            "Connection state changed"
        );
        self.state = next;
        Ok(())
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}
