//! Realtime session entities.
//!
//! A [`Session`] binds one verified [`Identity`] to one live socket
//! connection. Sessions exist only in memory and never outlive the
//! connection they belong to.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::user::normalize_email;

/// Opaque identifier of a live transport connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ConnectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ConnectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Verified payload decoded from a bearer token.
///
/// `email` is mandatory and normalised to lower case; every other claim is
/// kept verbatim in `profile`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    email: String,
    #[serde(flatten)]
    profile: Map<String, Value>,
}

impl Identity {
    /// Build an identity from a decoded token payload.
    ///
    /// Returns `None` when the payload is not an object or carries no
    /// non-empty string `email`.
    pub fn from_payload(payload: Value) -> Option<Self> {
        let Value::Object(mut profile) = payload else {
            return None;
        };

        let email = match profile.remove("email") {
            Some(Value::String(email)) => normalize_email(&email),
            _ => return None,
        };

        if email.is_empty() {
            return None;
        }

        Some(Self { email, profile })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Additional profile claims (id, name, ...).
    pub fn profile(&self) -> &Map<String, Value> {
        &self.profile
    }
}

/// One currently-connected, authenticated user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub identity: Identity,
    pub connection_id: ConnectionId,
}

impl Session {
    pub fn new(identity: Identity, connection_id: ConnectionId) -> Self {
        Self {
            identity,
            connection_id,
        }
    }

    pub fn email(&self) -> &str {
        self.identity.email()
    }
}
