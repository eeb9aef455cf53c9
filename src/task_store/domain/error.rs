//! Error taxonomy for the task lifecycle store.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants that
//! can be inspected by callers. The taxonomy is closed: every failure from
//! the storage, codec, and validation layers is funnelled into one of these
//! kinds before it reaches a caller.

use super::task::TaskState;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Errors surfaced by task store operations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// No row exists for the requested guid.
    #[error("task not found: {0}")]
    ResourceNotFound(String),

    /// A row with the desired guid already exists.
    #[error("task already exists: {0}")]
    ResourceExists(String),

    /// The persisted task definition bytes could not be decoded.
    #[error("failed to deserialize task definition: {0}")]
    Deserialize(String),

    /// An input field exceeded its length limit or was structurally invalid.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The guard on the task's current state rejected the transition.
    #[error("invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// State observed on the persisted row.
        from: TaskState,
        /// State the rejected operation would have produced.
        to: TaskState,
    },

    /// A completion report arrived from a cell the task is not bound to.
    #[error("Running on cell {running_on} not {requested}")]
    RunningOnDifferentCell {
        /// Cell the row is bound to.
        running_on: String,
        /// Cell that issued the report.
        requested: String,
    },

    /// Any other storage failure, propagated verbatim.
    #[error("storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps an unexpected storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }

    /// Reports whether the error is a client error rather than a store
    /// failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound(_)
                | Self::ResourceExists(_)
                | Self::BadRequest(_)
                | Self::InvalidStateTransition { .. }
                | Self::RunningOnDifferentCell { .. }
        )
    }
}

/// Error returned while parsing persisted state codes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state code: {0}")]
pub struct ParseTaskStateError(pub i32);
