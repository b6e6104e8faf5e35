//! WebSocket Connection Handler
//!
//! Admission happens before the upgrade, so rejected handshakes get a plain
//! HTTP error and never open a socket.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::{header::AUTHORIZATION, HeaderMap},
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use super::hub::RealtimeHub;
use crate::application::realtime::{ClientEvent, Connection, ServerEvent};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Handshake query parameters
#[derive(Debug, Default, Deserialize)]
pub struct HandshakeQuery {
    pub token: Option<String>,
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HandshakeQuery>,
) -> Result<Response, AppError> {
    let credential = extract_credential(&headers, query.token.as_deref());
    let hub = state.realtime.clone();

    let mut connection = Connection::new();
    hub.admit(&mut connection, &credential).await?;

    let failed_hub = hub.clone();
    let failed_id = connection.id().clone();

    Ok(ws
        .max_message_size(state.settings.websocket.max_message_size)
        .max_frame_size(state.settings.websocket.max_frame_size)
        .on_failed_upgrade(move |e| {
            tracing::warn!(connection_id = %failed_id, error = %e, "WebSocket upgrade failed");
            failed_hub.release(&failed_id);
        })
        .on_upgrade(move |socket| handle_socket(socket, hub, connection)))
}

/// Credential from `Authorization` (with or without the `Bearer ` prefix),
/// then the `token` query parameter, else empty.
pub fn extract_credential(headers: &HeaderMap, query_token: Option<&str>) -> String {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(value) = header {
        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "))
            .unwrap_or(value);
        return token.trim().to_string();
    }

    query_token.map(str::trim).unwrap_or_default().to_string()
}

/// Drive one admitted connection until either side closes
async fn handle_socket(socket: WebSocket, hub: Arc<RealtimeHub>, mut connection: Connection) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    if let Err(e) = hub.open(&mut connection, tx) {
        tracing::error!(connection_id = %connection.id(), error = %e, "Failed to open connection");
        hub.close(&mut connection);
        return;
    }

    let connection_id = connection.id().clone();

    // Forward queued events to the socket
    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    });

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(text.as_str()) {
                Ok(event) => hub.dispatch(&connection, event),
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        "Ignoring unrecognized frame"
                    );
                }
            },
            Ok(Message::Close(_)) => {
                tracing::debug!(connection_id = %connection_id, "Connection closed");
                break;
            }
            Ok(_) => {
                // Ping/pong is handled by axum; binary frames are not part of the protocol
            }
            Err(e) => {
                tracing::debug!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    hub.close(&mut connection);
    writer.abort();
}
