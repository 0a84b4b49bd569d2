//! daylog - Daily collaborative workspace logs
//!
//! Members of a workspace co-edit one shared text document per calendar day.
//! Concurrent edits converge through the diamond-types CRDT. Once a day the
//! previous day's documents are flushed into durable storage and evicted
//! from memory.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no I/O
//!   - Room key codec and the UTC+9 reference timezone
//!   - CRDT edit operations, archive records
//!   - Configuration and error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Room registry
//!   - Archival job, scheduler and orphan reclaimer
//!   - Postgres and in-memory storage
//!   - Axum HTTP surface
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use daylog::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app.router).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
