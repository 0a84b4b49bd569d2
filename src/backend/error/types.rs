/**
 * Backend Error Types
 *
 * This module defines error types returned by the HTTP handlers.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Bad input to a handler: unparseable bodies, invalid dates, bad ranges.
 *
 * ## Room Errors
 *
 * The client tried to edit a room that has already been archived. It should
 * reopen the room and retry.
 *
 * ## Storage and Archival Errors
 *
 * Failures from the log store, the workspace directory or an on-demand
 * archival run. Background runs never go through here; they only log.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::archive::ArchiveError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use daylog::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Edit against a room that has been archived
    #[error("Room {key} has been archived")]
    RoomClosed {
        /// Registry key of the room
        key: String,
    },

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Storage collaborator error
    #[error(transparent)]
    StoreError(#[from] StoreError),

    /// On-demand archival or reclaim error
    #[error(transparent)]
    ArchiveError(#[from] ArchiveError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new room closed error
    pub fn room_closed(key: impl Into<String>) -> Self {
        Self::RoomClosed { key: key.into() }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `RoomClosed` - 409 Conflict
    /// - `SharedError` - 400 Bad Request
    /// - `StoreError` - 503 Service Unavailable
    /// - `ArchiveError` - 503 if the workspace list was unavailable, else 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::RoomClosed { .. } => StatusCode::CONFLICT,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::StoreError(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ArchiveError(err) if err.is_fatal() => StatusCode::SERVICE_UNAVAILABLE,
            Self::ArchiveError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
