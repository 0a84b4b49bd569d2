/**
 * Realtime Liveness Probe
 *
 * Reports whether the realtime sync transport is accepting connections.
 * The server binary marks it up once the listener is bound and down when
 * it shuts down. Nothing in the archival code reads it.
 */

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared up/down flag for the sync transport
#[derive(Debug, Clone, Default)]
pub struct RealtimeProbe {
    up: Arc<AtomicBool>,
}

impl RealtimeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_up(&self) {
        self.up.store(true, Ordering::SeqCst);
    }

    pub fn mark_down(&self) {
        self.up.store(false, Ordering::SeqCst);
    }

    pub fn is_up(&self) -> bool {
        self.up.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub realtime: bool,
}

/// Liveness probe (GET /health)
pub async fn handle_health(State(probe): State<RealtimeProbe>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        realtime: probe.is_up(),
    })
}
