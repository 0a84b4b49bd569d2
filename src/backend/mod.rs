//! Backend Module
//!
//! All server-side code: the room registry, the archival subsystem, the
//! storage collaborators and the Axum HTTP surface.
//!
//! This module is only compiled when the `ssr` feature is enabled (it is on
//! by default).
//!
//! # Architecture
//!
//! - **`collab`** - Room registry and today's-room edit handlers
//! - **`archive`** - Archival job, daily scheduler, orphan reclaimer
//! - **`store`** - Log store and workspace directory (Postgres, in-memory)
//! - **`server`** - Configuration, state wiring, app creation
//! - **`routes`** - HTTP route configuration
//! - **`realtime`** - Liveness probe for the sync transport
//! - **`error`** - HTTP-facing error types
//!
//! # Room Lifecycle
//!
//! ```text
//! first edit of the day ──► RoomRegistry::get_or_create("{ws}-{date}")
//!                                   │
//!             edits via PUT /collab/{ws} (diamond-types OpLog)
//!                                   │
//! 15:00 UTC ──► ArchivalScheduler ──► ArchivalJob::run(yesterday)
//!                                   │   extract → upsert if non-blank → destroy
//!                                   ▼
//!                              LogStore (daily_logs)
//!
//! every hour ──► OrphanReclaimer::sweep()  (deleted workspaces, malformed keys)
//! ```
//!
//! # Thread Safety
//!
//! The registry's key map and each document sit behind their own
//! `tokio::sync::RwLock`. Storage collaborators are `Send + Sync` trait
//! objects shared through `Arc`.

/// Room registry and edit handlers
#[cfg(feature = "ssr")]
pub mod collab;

/// Archival subsystem
#[cfg(feature = "ssr")]
pub mod archive;

/// Storage collaborators
#[cfg(feature = "ssr")]
pub mod store;

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Sync transport liveness
#[cfg(feature = "ssr")]
pub mod realtime;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use archive::{ArchivalJob, ArchivalScheduler, ArchiveError, ArchiveReport, OrphanReclaimer};
#[cfg(feature = "ssr")]
pub use collab::state::RoomRegistry;
#[cfg(feature = "ssr")]
pub use error::BackendError;
#[cfg(feature = "ssr")]
pub use server::create_app;
#[cfg(feature = "ssr")]
pub use store::{LogStore, StoreError, WorkspaceDirectory};
