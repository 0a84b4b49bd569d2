//! Shared Error Types
//!
//! This module defines error types that are shared between the HTTP layer and
//! the room lifecycle code. These errors represent failures that can occur
//! without touching storage.
//!
//! # Error Categories
//!
//! - `ValidationError` - Data validation failures (e.g. edit positions out of range)
//! - `MalformedKey` - A room key that doesn't decode to a workspace and a date
//!
//! # Usage
//!
//! ```rust
//! use daylog::shared::error::SharedError;
//!
//! let error = SharedError::validation("position", "past the end of the document");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Room key without a `-YYYY-MM-DD` suffix or without a workspace
    #[error("Malformed room key: {key:?}")]
    MalformedKey {
        /// The offending key
        key: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new malformed key error
    pub fn malformed_key(key: impl Into<String>) -> Self {
        Self::MalformedKey { key: key.into() }
    }
}
