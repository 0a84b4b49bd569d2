//! Collaborative Editing Module
//!
//! Server-side rooms for collaborative text editing with the diamond-types
//! CRDT. It includes:
//! - The room registry (one OpLog per workspace and day)
//! - JSON handlers for reading and editing today's room
//!
//! # Example
//!
//! ```rust,no_run
//! use daylog::backend::collab::state::RoomRegistry;
//! use daylog::shared::RoomKey;
//!
//! # async fn example() {
//! let registry = RoomRegistry::new();
//! let doc = registry.open(&RoomKey::today("ws-1")).await;
//! println!("{}", doc.read().await.text());
//! # }
//! ```

/// Room registry and documents
pub mod state;

/// HTTP handlers for editing rooms
pub mod handlers;

/// Re-export commonly used types
pub use handlers::{handle_collab_get, handle_collab_put};
pub use state::{RoomDocument, RoomRegistry, SharedDocument};
