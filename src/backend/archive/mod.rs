//! Archival Module
//!
//! Moves rooms out of memory and into the log store.
//!
//! # Architecture
//!
//! - **`job`** - Daily archival of every workspace's room for one target day
//! - **`scheduler`** - Fires the job once a day at a fixed UTC time
//! - **`reclaimer`** - Evicts rooms of deleted workspaces and malformed keys
//! - **`retire`** - Extract/persist/evict path shared by job and reclaimer
//! - **`error`** - Failure kinds
//! - **`handlers`** - Range reads and on-demand runs over HTTP
//!
//! # Failure Policy
//!
//! A single room's failure never aborts a run. Only an unavailable workspace
//! list does, and the next day's trigger retries independently. A room whose
//! write fails is still evicted, so that day's content is lost.

/// Failure kinds
pub mod error;

/// Shared extract/persist/evict path
pub mod retire;

/// Daily archival job
pub mod job;

/// Orphan reclaimer
pub mod reclaimer;

/// Daily trigger
pub mod scheduler;

/// HTTP handlers
pub mod handlers;

pub use error::ArchiveError;
pub use job::{ArchivalJob, ArchiveReport};
pub use reclaimer::OrphanReclaimer;
pub use retire::RoomOutcome;
pub use scheduler::{ArchivalScheduler, SchedulerState, TriggerOutcome};
