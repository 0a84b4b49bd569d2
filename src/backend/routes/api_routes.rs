/**
 * API Route Configuration
 *
 * # Routes
 *
 * ## Archived logs
 * - `GET /workspaces/{workspace_id}/logs` - Archived days in a date range
 *
 * ## Operations
 * - `POST /admin/archive` - Run archival for a day now
 * - `POST /admin/reclaim` - Run one orphan sweep now
 * - `GET /health` - Liveness probe for the sync transport
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::archive::handlers::{handle_archive_now, handle_log_range, handle_reclaim_now};
use crate::backend::realtime::handle_health;
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/workspaces/{workspace_id}/logs", get(handle_log_range))
        .route("/admin/archive", post(handle_archive_now))
        .route("/admin/reclaim", post(handle_reclaim_now))
        .route("/health", get(handle_health))
}
