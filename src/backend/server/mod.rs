//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── state.rs  - AppState and FromRef for the probe
//! ├── config.rs - Environment configuration and database loading
//! └── init.rs   - State wiring, background tasks, app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Storage**: Postgres if `DATABASE_URL` connects, in-memory otherwise
//! 3. **State Creation**: one room registry shared by every component
//! 4. **Background Tasks**: daily archival trigger and orphan sweep
//! 5. **Router Creation**: collab, archive and health routes

/// Application state
pub mod state;

/// Configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::ServerConfig;
pub use init::{build_state, create_app, BackendApp};
pub use state::AppState;
