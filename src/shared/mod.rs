//! Shared Module
//!
//! This module contains types and data structures that are used by both the
//! room lifecycle code and the HTTP surface: the room key codec, CRDT wire
//! types, archive records, configuration and errors.
//!
//! Nothing in here touches storage or the network.

/// Room key codec and reference timezone
pub mod room_key;

/// Shared error types
pub mod error;

/// CRDT types for collaborative editing
pub mod crdt;

/// Archive records
pub mod archive;

/// Archival configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use archive::{ArchiveRecord, LogRange};
pub use config::{ArchiveConfig, ArchiveConfigBuilder, ConfigError};
pub use crdt::{ApplyOperationsRequest, ApplyOperationsResponse, CRDTOperation, DocumentState};
pub use error::SharedError;
pub use room_key::RoomKey;
