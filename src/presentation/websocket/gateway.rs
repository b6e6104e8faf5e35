//! WebSocket Gateway
//!
//! Connection hub: one outbound queue per attached peer. Implements the
//! realtime [`BroadcastChannel`] so the relay never touches sockets.

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::application::realtime::{BroadcastChannel, ServerEvent};
use crate::domain::ConnectionId;

/// Outbound queue of a single peer
pub type PeerSender = mpsc::UnboundedSender<ServerEvent>;

/// Registry of live WebSocket peers keyed by connection id
#[derive(Default)]
pub struct Gateway {
    peers: DashMap<ConnectionId, PeerSender>,
}

impl Gateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` reachable for sends and broadcasts.
    pub fn attach(&self, id: ConnectionId, sender: PeerSender) {
        tracing::debug!(connection_id = %id, "Peer attached");
        self.peers.insert(id, sender);
    }

    /// Stop delivering to `id`. Dropping the sender ends its writer task.
    pub fn detach(&self, id: &ConnectionId) -> bool {
        let removed = self.peers.remove(id).is_some();
        if removed {
            tracing::debug!(connection_id = %id, "Peer detached");
        }
        removed
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Drop every peer queue (shutdown).
    pub fn clear(&self) {
        self.peers.clear();
    }

    fn fan_out(&self, skip: Option<&ConnectionId>, event: ServerEvent) {
        let mut closed = Vec::new();

        for peer in self.peers.iter() {
            if skip == Some(peer.key()) {
                continue;
            }
            if peer.value().send(event.clone()).is_err() {
                closed.push(peer.key().clone());
            }
        }

        // Removing while iterating would deadlock on the shard lock.
        for id in closed {
            tracing::debug!(connection_id = %id, "Pruning closed peer");
            self.peers.remove(&id);
        }
    }
}

impl BroadcastChannel for Gateway {
    fn send_to(&self, id: &ConnectionId, event: ServerEvent) -> bool {
        let Some(sender) = self.peers.get(id).map(|peer| peer.value().clone()) else {
            return false;
        };
        if sender.send(event).is_err() {
            self.peers.remove(id);
            return false;
        }
        true
    }

    fn broadcast(&self, event: ServerEvent) {
        self.fan_out(None, event);
    }

    fn broadcast_except(&self, excluded: &ConnectionId, event: ServerEvent) {
        self.fan_out(Some(excluded), event);
    }
}
