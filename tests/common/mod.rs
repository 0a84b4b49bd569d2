//! Common test utilities and helpers
//!
//! - Storage doubles that fail on demand
//! - A wired-up registry/job/reclaimer harness
//! - Custom assertion macros

pub mod assertions;
pub mod stores;

pub use fixtures::*;
pub use stores::*;
