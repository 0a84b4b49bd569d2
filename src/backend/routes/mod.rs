//! Routes Module
//!
//! HTTP route configuration for the server.
//!
//! - **`router`** - Main router assembly
//! - **`api_routes`** - Archived logs, operations and health routes

/// Main router creation
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
