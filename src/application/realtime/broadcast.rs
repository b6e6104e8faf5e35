//! Broadcast capability used by the event relay.

use super::events::ServerEvent;
use crate::domain::ConnectionId;

/// Fans server events out to connected peers.
///
/// Implementations must deliver events from one caller in the order they
/// were submitted.
pub trait BroadcastChannel: Send + Sync {
    /// Deliver to a single connection. Returns `false` if it is not reachable.
    fn send_to(&self, connection_id: &ConnectionId, event: ServerEvent) -> bool;

    /// Deliver to every connected peer.
    fn broadcast(&self, event: ServerEvent);

    /// Deliver to every connected peer except `excluded`.
    fn broadcast_except(&self, excluded: &ConnectionId, event: ServerEvent);
}
