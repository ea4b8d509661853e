//! Error types for document operations.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for document operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in document operations.
///
/// Mutation API calls never surface these; they degrade to no-ops. The
/// variants reach callers through history restores, bulk replacement and
/// remote-response handling, and are kept as the editor's last error.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Element not found in the document.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// An element failed validation.
    #[error("Invalid element {id}: {source}")]
    InvalidElement {
        /// Offending element id (or its index when the id is unusable).
        id: String,
        /// The rule it broke.
        #[source]
        source: ValidationError,
    },

    /// A payload could not be interpreted as a list of elements.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Payload-level validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A history snapshot could not be parsed.
    #[error("Corrupted history snapshot at index {index}: {reason}")]
    CorruptSnapshot {
        /// Index of the snapshot in history.
        index: usize,
        /// Parser message.
        reason: String,
    },

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The same remote action is already in flight.
    #[error("Request already in progress: {0}")]
    Busy(String),

    /// The remote service answered without a usable result.
    #[error("Remote request failed: {0}")]
    Remote(String),
}
