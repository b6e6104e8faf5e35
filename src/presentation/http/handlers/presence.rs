//! Presence Handlers

use axum::{extract::State, Json};

use crate::application::dto::response::PresenceResponse;
use crate::startup::AppState;

/// Snapshot of connected realtime clients
pub async fn list_presence(State(state): State<AppState>) -> Json<PresenceResponse> {
    let registry = state.realtime.registry();
    let emails = registry.emails();

    Json(PresenceResponse {
        clients: emails.len(),
        emails,
    })
}
