//! Connection Gatekeeper
//!
//! Admission control run once per connection attempt, before any event
//! handler exists for the connection.

use std::sync::Arc;

use super::connection::{Connection, ConnectionState};
use super::error::RealtimeError;
use super::registry::PresenceRegistry;
use crate::domain::{Session, TokenVerifier};
use crate::infrastructure::metrics;

/// Authenticates handshakes and registers admitted sessions.
pub struct Gatekeeper {
    verifier: Arc<dyn TokenVerifier>,
    registry: Arc<PresenceRegistry>,
}

impl Gatekeeper {
    pub fn new(verifier: Arc<dyn TokenVerifier>, registry: Arc<PresenceRegistry>) -> Self {
        Self { verifier, registry }
    }

    /// Admit or reject `connection` using the raw handshake credential.
    ///
    /// On success the session is already in the registry and the connection
    /// is `Admitted`. On failure the connection is `Rejected` and the
    /// registry is untouched.
    pub async fn admit(
        &self,
        connection: &mut Connection,
        credential: &str,
    ) -> Result<Session, RealtimeError> {
        connection.transition(ConnectionState::Authenticating)?;

        match self.authenticate(connection, credential).await {
            Ok(session) => {
                connection.transition(ConnectionState::Admitted)?;
                metrics::record_admission("admitted");
                metrics::set_active_sessions(self.registry.len());
                tracing::info!(
                    connection_id = %connection.id(),
                    email = %session.email(),
                    "Connection admitted"
                );
                Ok(session)
            }
            Err(err) => {
                connection.transition(ConnectionState::Rejected)?;
                metrics::record_admission(err.outcome());
                tracing::warn!(
                    connection_id = %connection.id(),
                    reason = %err,
                    "Connection rejected"
                );
                Err(err)
            }
        }
    }

    async fn authenticate(
        &self,
        connection: &Connection,
        credential: &str,
    ) -> Result<Session, RealtimeError> {
        let identity = self
            .verifier
            .verify(credential)
            .await
            .map_err(|e| RealtimeError::Authentication(e.to_string()))?;

        if self.registry.find_by_email(identity.email()).is_some() {
            return Err(RealtimeError::DuplicateSession(identity.email().to_string()));
        }

        let session = Session::new(identity, connection.id().clone());
        // Verification may have yielded; insert re-checks under the registry lock.
        self.registry.insert(session.clone())?;
        Ok(session)
    }
}
