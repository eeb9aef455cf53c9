//! Repository port for task row persistence.
//!
//! The port exposes row-level primitives plus a single guarded-transition
//! primitive. Implementations must run a transition's read and write inside
//! one transaction, with the row selected under an exclusive row-level hold
//! until commit, so that concurrent transitions on the same guid are
//! serialized by the store. A rejected or aborted transition leaves the row
//! bit-exactly unchanged.

use crate::task_store::domain::{TaskFilter, TaskRecord, TaskState, TaskStoreError};
use async_trait::async_trait;

/// Decision callback evaluated against the locked row inside the
/// transaction. The callback is pure: it inspects the pre-image and either
/// rejects the transition or names the columns to assign.
pub type TransitionFn =
    Box<dyn FnOnce(&TaskRecord) -> Result<TransitionDecision, TaskStoreError> + Send>;

/// Outcome of a transition decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionDecision {
    /// Assign the named columns and commit.
    Apply(TaskMutation),
    /// Leave the row untouched (idempotent retry).
    Noop,
    /// Remove the row.
    Remove,
}

/// Set of column assignments for a task row.
///
/// Only lifecycle columns are assignable; `guid`, `domain`, `created_at`,
/// and the definition payload are immutable after creation. Unset fields
/// are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskMutation {
    /// New lifecycle state.
    pub state: Option<TaskState>,
    /// New cell binding; assign the empty string to clear it.
    pub cell_id: Option<String>,
    /// New last-write instant.
    pub updated_at: Option<i64>,
    /// First completion instant, assigned once at completion time.
    pub first_completed_at: Option<i64>,
    /// Terminal outcome flag.
    pub failed: Option<bool>,
    /// Failure cause.
    pub failure_reason: Option<String>,
    /// Opaque success payload.
    pub result: Option<String>,
}

impl TaskMutation {
    /// Applies the assignments to an in-memory record image.
    pub fn apply_to(&self, record: &mut TaskRecord) {
        if let Some(state) = self.state {
            record.state = state;
        }
        if let Some(cell_id) = &self.cell_id {
            record.cell_id.clone_from(cell_id);
        }
        if let Some(updated_at) = self.updated_at {
            record.updated_at = updated_at;
        }
        if let Some(first_completed_at) = self.first_completed_at {
            record.first_completed_at = first_completed_at;
        }
        if let Some(failed) = self.failed {
            record.failed = failed;
        }
        if let Some(failure_reason) = &self.failure_reason {
            record.failure_reason.clone_from(failure_reason);
        }
        if let Some(result) = &self.result {
            record.result.clone_from(result);
        }
    }
}

/// Pre- and post-images of a committed transition.
///
/// `after` is `None` when the transition removed the row, and equals
/// `before` when the decision was [`TransitionDecision::Noop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionReceipt {
    /// Row image observed under the lock, before any write.
    pub before: TaskRecord,
    /// Row image after commit; `None` when the row was removed.
    pub after: Option<TaskRecord>,
}

/// Task row persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::ResourceExists`] when a row with the same
    /// guid is already present.
    async fn insert(&self, record: TaskRecord) -> Result<(), TaskStoreError>;

    /// Reads one row by guid.
    ///
    /// Returns `None` when no row exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Storage`] on storage failure.
    async fn select_by_guid(&self, guid: &str) -> Result<Option<TaskRecord>, TaskStoreError>;

    /// Reads every row satisfying the filter, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Storage`] on storage failure.
    async fn select_all(&self, filter: &TaskFilter) -> Result<Vec<TaskRecord>, TaskStoreError>;

    /// Runs a guarded transition on the row with the given guid.
    ///
    /// The row is read under an exclusive row-level hold, `decide` is
    /// evaluated against the pre-image, and the decision is applied inside
    /// the same transaction. An error from `decide` aborts the transaction
    /// and propagates unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::ResourceNotFound`] when no row exists for
    /// the guid, the error produced by `decide` when the guard rejects the
    /// transition, or [`TaskStoreError::Storage`] on storage failure.
    async fn transition(
        &self,
        guid: &str,
        decide: TransitionFn,
    ) -> Result<TransitionReceipt, TaskStoreError>;
}
