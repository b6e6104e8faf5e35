//! WebSocket Gateway
//!
//! Real-time transport at `GET /socket`.

pub mod gateway;
pub mod handler;
pub mod hub;

pub use gateway::{Gateway, PeerSender};
pub use handler::ws_handler;
pub use hub::RealtimeHub;
