/**
 * Server Initialization
 *
 * Builds the application state and router, and starts the background
 * archival tasks.
 *
 * # Initialization Process
 *
 * 1. Connect the database if one is configured
 * 2. Pick Postgres or in-memory collaborators
 * 3. Create the one room registry for this process
 * 4. Wire the archival job, scheduler and reclaimer to it
 * 5. Start the daily scheduler and the periodic orphan sweep
 * 6. Create the router
 */

use axum::Router;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::backend::archive::{ArchivalJob, ArchivalScheduler, OrphanReclaimer};
use crate::backend::collab::state::RoomRegistry;
use crate::backend::realtime::RealtimeProbe;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::{
    LogStore, MemoryLogStore, MemoryWorkspaceDirectory, PgLogStore, PgWorkspaceDirectory,
    WorkspaceDirectory,
};
use crate::shared::ArchiveConfig;

/// A configured server: the router to serve and the state behind it
pub struct BackendApp {
    pub router: Router<()>,
    pub state: AppState,
    pub tasks: Vec<JoinHandle<()>>,
}

/// Wire the archival components around one registry
///
/// No background task is started; see [`spawn_background_tasks`].
pub fn build_state(
    registry: Arc<RoomRegistry>,
    workspaces: Arc<dyn WorkspaceDirectory>,
    log_store: Arc<dyn LogStore>,
    archive: &ArchiveConfig,
) -> AppState {
    let job = Arc::new(ArchivalJob::new(
        registry.clone(),
        workspaces.clone(),
        log_store.clone(),
    ));
    let scheduler = Arc::new(ArchivalScheduler::new(job, archive.fire_at_utc));
    let reclaimer = Arc::new(OrphanReclaimer::new(
        registry.clone(),
        workspaces,
        log_store.clone(),
    ));

    AppState {
        registry,
        log_store,
        scheduler,
        reclaimer,
        realtime: RealtimeProbe::new(),
    }
}

/// Start the daily archival trigger and the periodic orphan sweep
pub fn spawn_background_tasks(state: &AppState, archive: &ArchiveConfig) -> Vec<JoinHandle<()>> {
    let scheduler = state.scheduler.clone().spawn();

    let reclaimer = state.reclaimer.clone();
    let period = archive.reclaim_interval;
    let sweeper = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately; nothing to sweep at startup
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(e) = reclaimer.sweep().await {
                tracing::error!("[Reclaim] Sweep failed: {}", e);
            }
        }
    });

    vec![scheduler, sweeper]
}

/// Create and configure the application
pub async fn create_app(config: &ServerConfig) -> BackendApp {
    tracing::info!("Initializing daylog server");

    let (workspaces, log_store): (Arc<dyn WorkspaceDirectory>, Arc<dyn LogStore>) =
        match load_database(config.database_url.as_deref()).await {
            Some(pool) => (
                Arc::new(PgWorkspaceDirectory::new(pool.clone())),
                Arc::new(PgLogStore::new(pool)),
            ),
            None => {
                tracing::info!(
                    "Using in-memory stores with {} seeded workspaces",
                    config.seed_workspaces.len()
                );
                (
                    Arc::new(MemoryWorkspaceDirectory::with_workspaces(
                        config.seed_workspaces.iter().cloned(),
                    )),
                    Arc::new(MemoryLogStore::new()),
                )
            }
        };

    let registry = Arc::new(RoomRegistry::new());
    let state = build_state(registry, workspaces, log_store, &config.archive);
    let tasks = spawn_background_tasks(&state, &config.archive);
    tracing::info!(
        "Archival scheduled daily at {} UTC, orphan sweep every {:?}",
        config.archive.fire_at_utc,
        config.archive.reclaim_interval
    );

    let router = create_router(state.clone());
    BackendApp {
        router,
        state,
        tasks,
    }
}
