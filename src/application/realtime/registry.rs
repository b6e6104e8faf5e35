//! Presence Registry
//!
//! In-memory set of admitted sessions, indexed by connection id and by
//! email. Both indexes live behind one lock so they can never disagree.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::error::RealtimeError;
use crate::domain::{normalize_email, ConnectionId, Session};

#[derive(Debug, Default)]
struct Sessions {
    by_connection: HashMap<ConnectionId, Session>,
    by_email: HashMap<String, ConnectionId>,
}

/// Authoritative record of who is online right now.
///
/// Invariants held across every mutation:
/// - at most one session per email
/// - at most one session per connection id
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    inner: RwLock<Sessions>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session, re-validating uniqueness under the write lock.
    pub fn insert(&self, session: Session) -> Result<(), RealtimeError> {
        let mut inner = self.inner.write();

        if inner.by_email.contains_key(session.email())
            || inner.by_connection.contains_key(&session.connection_id)
        {
            return Err(RealtimeError::Conflict(session.email().to_string()));
        }

        inner
            .by_email
            .insert(session.email().to_string(), session.connection_id.clone());
        inner
            .by_connection
            .insert(session.connection_id.clone(), session);
        Ok(())
    }

    pub fn find_by_connection_id(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.inner.read().by_connection.get(connection_id).cloned()
    }

    pub fn find_by_email(&self, email: &str) -> Option<Session> {
        let inner = self.inner.read();
        inner
            .by_email
            .get(&normalize_email(email))
            .and_then(|id| inner.by_connection.get(id))
            .cloned()
    }

    /// Remove the session bound to `connection_id`. Unknown ids are a no-op.
    pub fn remove(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut inner = self.inner.write();
        let session = inner.by_connection.remove(connection_id)?;
        inner.by_email.remove(session.email());
        Some(session)
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_connection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted snapshot of online emails.
    pub fn emails(&self) -> Vec<String> {
        let mut emails: Vec<String> = self.inner.read().by_email.keys().cloned().collect();
        emails.sort();
        emails
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.by_connection.clear();
        inner.by_email.clear();
    }
}
