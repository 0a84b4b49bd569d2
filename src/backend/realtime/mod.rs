//! Real-time Transport Module
//!
//! The sync transport itself is the collab edit surface; this module only
//! exposes whether it is up, for external health reporting.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs   - Module exports and documentation
//! └── probe.rs - Liveness flag and GET /health handler
//! ```

/// Liveness probe
pub mod probe;

pub use probe::{handle_health, HealthResponse, RealtimeProbe};
