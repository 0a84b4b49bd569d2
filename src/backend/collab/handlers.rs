/**
 * Collaborative Editing Handlers
 *
 * Minimal JSON edit surface over today's room for a workspace:
 * - GET /collab/{workspace_id} - Snapshot of today's document (opens the room)
 * - PUT /collab/{workspace_id} - Apply insert/delete operations
 *
 * "Today" is the calendar day in UTC+9 at the time of the request.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;

use crate::backend::collab::state::generate_agent_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{ApplyOperationsRequest, ApplyOperationsResponse, DocumentState, RoomKey};

/// Longest agent name a client may choose for itself
const MAX_AGENT_LEN: usize = 48;

/// Snapshot of today's room (GET /collab/{workspace_id})
pub async fn handle_collab_get(
    State(app_state): State<AppState>,
    Path(workspace_id): Path<String>,
) -> Result<Json<DocumentState>, BackendError> {
    let room = RoomKey::today(workspace_id);
    let key = room.encode();
    tracing::debug!("[Collab] Snapshot request for room {}", key);

    let doc_state = app_state.registry.get_or_create(&key).await;
    let doc = doc_state.read().await;
    Ok(Json(doc.state(&key)))
}

/// Apply edits to today's room (PUT /collab/{workspace_id})
pub async fn handle_collab_put(
    State(app_state): State<AppState>,
    Path(workspace_id): Path<String>,
    body: Bytes,
) -> Result<Json<ApplyOperationsResponse>, BackendError> {
    let request: ApplyOperationsRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("[Collab] Failed to parse request ({} bytes): {}", body.len(), e);
        BackendError::handler(StatusCode::BAD_REQUEST, format!("invalid edit request: {}", e))
    })?;

    let agent = match request.agent {
        Some(agent) if agent.is_empty() || agent.len() > MAX_AGENT_LEN => {
            return Err(BackendError::handler(
                StatusCode::BAD_REQUEST,
                format!("agent must be 1 to {} bytes", MAX_AGENT_LEN),
            ));
        }
        Some(agent) => agent,
        None => generate_agent_id(),
    };

    let room = RoomKey::today(workspace_id);
    let key = room.encode();
    let doc_state = app_state.registry.get_or_create(&key).await;
    let mut doc = doc_state.write().await;
    if doc.is_closed() {
        return Err(BackendError::room_closed(key));
    }

    let applied = doc.apply(&agent, &request.operations)?;
    tracing::debug!("[Collab] Applied {} operations to room {} as {}", applied, key, agent);

    Ok(Json(ApplyOperationsResponse {
        applied,
        state: doc.state(&key),
    }))
}
