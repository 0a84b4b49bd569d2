/**
 * Application State Management
 *
 * This module defines the application state shared by every handler, and
 * the `FromRef` implementation that lets the health handler extract only
 * the realtime probe.
 *
 * # Ownership
 *
 * There is exactly one `RoomRegistry` per process. It is constructed at
 * startup and handed, behind an `Arc`, to the HTTP state, the archival job
 * and the orphan reclaimer. Nothing reaches it through a global.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::archive::{ArchivalScheduler, OrphanReclaimer};
use crate::backend::collab::state::RoomRegistry;
use crate::backend::realtime::RealtimeProbe;
use crate::backend::store::LogStore;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Live rooms, one document per workspace and day
    pub registry: Arc<RoomRegistry>,

    /// Durable store of archived day logs
    pub log_store: Arc<dyn LogStore>,

    /// Daily archival trigger, also used for on-demand runs
    pub scheduler: Arc<ArchivalScheduler>,

    /// Orphan sweep, used by the periodic task and on demand
    pub reclaimer: Arc<OrphanReclaimer>,

    /// Whether the sync transport is accepting connections
    pub realtime: RealtimeProbe,
}

impl FromRef<AppState> for RealtimeProbe {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.realtime.clone()
    }
}
