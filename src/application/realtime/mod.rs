//! Realtime presence & broadcast core.
//!
//! - **Gatekeeper**: authenticates handshakes and enforces one session per email
//! - **PresenceRegistry**: who is online right now
//! - **EventRelay**: greets, relays chat/typing events, cleans up on disconnect
//!
//! The transport (WebSocket) lives in the presentation layer and reaches
//! peers through the [`BroadcastChannel`] trait.

pub mod broadcast;
pub mod connection;
pub mod error;
pub mod events;
pub mod gatekeeper;
pub mod registry;
pub mod relay;

pub use broadcast::BroadcastChannel;
pub use connection::{Connection, ConnectionState, TransitionError};
pub use error::RealtimeError;
pub use events::{ClientEvent, ServerEvent};
pub use gatekeeper::Gatekeeper;
pub use registry::PresenceRegistry;
pub use relay::EventRelay;
