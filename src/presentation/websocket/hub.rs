//! Realtime hub: the presence core wired to the WebSocket gateway.

use std::sync::Arc;

use super::gateway::{Gateway, PeerSender};
use crate::application::realtime::{
    ClientEvent, Connection, EventRelay, Gatekeeper, PresenceRegistry, RealtimeError,
};
use crate::domain::{ConnectionId, Session, TokenVerifier};
use crate::infrastructure::metrics;

/// Process-wide realtime services, built once at startup.
pub struct RealtimeHub {
    registry: Arc<PresenceRegistry>,
    gateway: Arc<Gateway>,
    gatekeeper: Gatekeeper,
    relay: EventRelay,
}

impl RealtimeHub {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        let registry = Arc::new(PresenceRegistry::new());
        let gateway = Arc::new(Gateway::new());

        Self {
            gatekeeper: Gatekeeper::new(verifier, registry.clone()),
            relay: EventRelay::new(registry.clone(), gateway.clone()),
            registry,
            gateway,
        }
    }

    /// Run admission for a handshake credential.
    pub async fn admit(
        &self,
        connection: &mut Connection,
        credential: &str,
    ) -> Result<Session, RealtimeError> {
        self.gatekeeper.admit(connection, credential).await
    }

    /// Attach the peer's outbound queue and greet it.
    pub fn open(&self, connection: &mut Connection, sender: PeerSender) -> Result<(), RealtimeError> {
        self.gateway.attach(connection.id().clone(), sender);
        self.relay.on_admitted(connection)
    }

    pub fn dispatch(&self, connection: &Connection, event: ClientEvent) {
        self.relay.dispatch(connection, event);
    }

    /// Detach and deregister. Idempotent.
    pub fn close(&self, connection: &mut Connection) -> Option<Session> {
        self.gateway.detach(connection.id());
        self.relay.on_disconnect(connection)
    }

    /// Drop an admitted session whose socket never materialized.
    pub fn release(&self, id: &ConnectionId) -> Option<Session> {
        let mut connection = Connection::with_id(id.clone());
        self.close(&mut connection)
    }

    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Forget every session and peer.
    pub fn shutdown(&self) {
        let sessions = self.registry.len();
        self.registry.clear();
        self.gateway.clear();
        metrics::set_active_sessions(0);
        tracing::info!(sessions, "Realtime hub shut down");
    }
}
