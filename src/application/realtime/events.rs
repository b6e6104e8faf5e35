//! Realtime wire events.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.
//! Event names and payload field names are part of the client contract.

use serde::{Deserialize, Serialize};

/// Events a connected client may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Chat message relayed to everyone, sender included.
    #[serde(rename = "message")]
    Message(String),

    /// Typing indicator, no payload.
    #[serde(rename = "clientWriting")]
    ClientWriting,

    /// Chat message relayed to everyone except the sender.
    #[serde(rename = "sendMessage")]
    SendMessage(String),
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Message(_) => "message",
            ClientEvent::ClientWriting => "clientWriting",
            ClientEvent::SendMessage(_) => "sendMessage",
        }
    }
}

/// Events pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "clientOnline")]
    ClientOnline { clients: usize },

    #[serde(rename = "newMessage")]
    NewMessage { email: String, message: String },

    #[serde(rename = "clientWriting")]
    ClientWriting { email: String },

    #[serde(rename = "receiveMessage")]
    ReceiveMessage { sender: String, message: String },
}
