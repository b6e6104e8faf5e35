//! Event Relay
//!
//! Handles the events of admitted connections: the presence greeting,
//! chat/typing relays and disconnect cleanup.

use std::sync::Arc;

use super::broadcast::BroadcastChannel;
use super::connection::{Connection, ConnectionState};
use super::error::RealtimeError;
use super::events::{ClientEvent, ServerEvent};
use super::registry::PresenceRegistry;
use crate::domain::Session;
use crate::infrastructure::metrics;

pub struct EventRelay {
    registry: Arc<PresenceRegistry>,
    channel: Arc<dyn BroadcastChannel>,
}

impl EventRelay {
    pub fn new(registry: Arc<PresenceRegistry>, channel: Arc<dyn BroadcastChannel>) -> Self {
        Self { registry, channel }
    }

    /// Activate an admitted connection and greet it with the presence count.
    ///
    /// The connection must already be reachable through the broadcast
    /// channel.
    pub fn on_admitted(&self, connection: &mut Connection) -> Result<(), RealtimeError> {
        connection.transition(ConnectionState::Active)?;

        let clients = self.registry.len();
        self.channel
            .send_to(connection.id(), ServerEvent::ClientOnline { clients });
        Ok(())
    }

    /// Relay one client event. Events for inactive or unknown connections
    /// are dropped.
    pub fn dispatch(&self, connection: &Connection, event: ClientEvent) {
        if !connection.is_active() {
            tracing::debug!(
                connection_id = %connection.id(),
                state = %connection.state(),
                event = event.name(),
                "Dropping event for inactive connection"
            );
            return;
        }

        let Some(session) = self.registry.find_by_connection_id(connection.id()) else {
            tracing::debug!(
                connection_id = %connection.id(),
                event = event.name(),
                "Dropping event for unregistered connection"
            );
            return;
        };

        let name = event.name();
        let email = session.email().to_string();

        match event {
            ClientEvent::Message(message) => {
                self.channel
                    .broadcast(ServerEvent::NewMessage { email, message });
            }
            ClientEvent::ClientWriting => {
                self.channel.broadcast(ServerEvent::ClientWriting { email });
            }
            ClientEvent::SendMessage(message) => {
                self.channel.broadcast_except(
                    connection.id(),
                    ServerEvent::ReceiveMessage {
                        sender: email,
                        message,
                    },
                );
            }
        }

        metrics::record_relayed_event(name);
    }

    /// Tear down the session of `connection`. Safe to call any number of
    /// times, and for connections that were never admitted.
    pub fn on_disconnect(&self, connection: &mut Connection) -> Option<Session> {
        if connection.state().can_transition_to(ConnectionState::Disconnected) {
            let _ = connection.transition(ConnectionState::Disconnected);
        }

        let removed = self.registry.remove(connection.id());
        metrics::set_active_sessions(self.registry.len());

        if let Some(session) = &removed {
            tracing::info!(
                connection_id = %connection.id(),
                email = %session.email(),
                "Client disconnected"
            );
        }

        removed
    }
}
