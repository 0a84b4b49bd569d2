/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Collab routes (today's room per workspace)
 * 2. API routes (archived logs, operations, health)
 * 3. Fallback handler (404)
 */

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::collab::handlers::{handle_collab_get, handle_collab_put};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// ## Collab Routes
///
/// - `GET /collab/{workspace_id}` - Snapshot of today's room
/// - `PUT /collab/{workspace_id}` - Apply edits to today's room
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route(
        "/collab/{workspace_id}",
        get(handle_collab_get).put(handle_collab_put),
    );

    let router = configure_api_routes(router);

    router
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
