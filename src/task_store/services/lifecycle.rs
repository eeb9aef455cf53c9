//! Task lifecycle state machine.
//!
//! Provides [`TaskLifecycleService`], which owns the guarded transitions of
//! the task lifecycle DAG:
//!
//! ```text
//! Pending ──start──▶ Running ──complete/cancel/fail──▶ Completed
//!    │                                                     │
//!    └──────cancel/fail──▶ Completed ──resolving──▶ Resolving ──delete──▶ ∅
//! ```
//!
//! Each operation validates its inputs, then runs its read-guard-write
//! sequence through the repository's single-transaction transition
//! primitive. A rejected guard aborts the transaction and leaves the row
//! unchanged.

use crate::task_store::domain::{
    Task, TaskDefinition, TaskFilter, TaskRecord, TaskState, TaskStoreError, TaskStoreResult,
    require_identifier, require_within_limit,
};
use crate::task_store::ports::{
    DefinitionCodec, TaskMutation, TaskRepository, TransitionDecision, TransitionReceipt,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Failure reason recorded when a task is cancelled.
pub const CANCELLED_FAILURE_REASON: &str = "task was cancelled";

/// Task lifecycle state machine over an injected repository, clock, and
/// definition codec.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C, D>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    D: DefinitionCodec,
{
    repository: Arc<R>,
    clock: Arc<C>,
    codec: Arc<D>,
}

impl<R, C, D> TaskLifecycleService<R, C, D>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    D: DefinitionCodec,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, codec: Arc<D>) -> Self {
        Self {
            repository,
            clock,
            codec,
        }
    }

    /// Creates a new Pending task from the given definition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::BadRequest`] for invalid guid or domain,
    /// [`TaskStoreError::ResourceExists`] when the guid is already present,
    /// or a storage error.
    pub async fn desire_task(
        &self,
        definition: &TaskDefinition,
        guid: &str,
        domain: &str,
    ) -> TaskStoreResult<()> {
        require_identifier("guid", guid)?;
        require_identifier("domain", domain)?;

        let payload = self.codec.marshal(definition)?;
        let now = self.now_ns();
        let record = TaskRecord {
            guid: guid.to_owned(),
            domain: domain.to_owned(),
            state: TaskState::Pending,
            cell_id: String::new(),
            created_at: now,
            updated_at: now,
            first_completed_at: 0,
            failed: false,
            failure_reason: String::new(),
            result: String::new(),
            definition: payload,
        };
        self.repository.insert(record).await?;
        debug!(guid, domain, "task desired");
        Ok(())
    }

    /// Enumerates tasks matching the filter.
    ///
    /// Returns an empty list when nothing matches. The call fails with
    /// [`TaskStoreError::Deserialize`] on the first row whose definition
    /// payload cannot be decoded; no partial result is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Deserialize`] on a corrupt payload or a
    /// storage error.
    pub async fn tasks(&self, filter: &TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let records = self.repository.select_all(filter).await?;
        records
            .into_iter()
            .map(|record| self.decode(record))
            .collect()
    }

    /// Reads one task by guid.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::ResourceNotFound`] when absent or
    /// [`TaskStoreError::Deserialize`] when the payload is corrupt.
    pub async fn task_by_guid(&self, guid: &str) -> TaskStoreResult<Task> {
        let record = self
            .repository
            .select_by_guid(guid)
            .await?
            .ok_or_else(|| TaskStoreError::ResourceNotFound(guid.to_owned()))?;
        self.decode(record)
    }

    /// Binds a Pending task to a cell and marks it Running.
    ///
    /// Returns `true` when the task transitioned, `false` when the task was
    /// already Running on the same cell (idempotent retry; no write).
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::BadRequest`] for an invalid cell id,
    /// [`TaskStoreError::ResourceNotFound`] when absent, or
    /// [`TaskStoreError::InvalidStateTransition`] when the task is Running
    /// on a different cell or already terminal.
    pub async fn start_task(&self, guid: &str, cell_id: &str) -> TaskStoreResult<bool> {
        require_identifier("cell_id", cell_id)?;

        let now = self.now_ns();
        let cell = cell_id.to_owned();
        let receipt = self
            .transition(guid, move |record| match record.state {
                TaskState::Pending => Ok(TransitionDecision::Apply(TaskMutation {
                    state: Some(TaskState::Running),
                    cell_id: Some(cell),
                    updated_at: Some(now),
                    ..TaskMutation::default()
                })),
                TaskState::Running if record.cell_id == cell => Ok(TransitionDecision::Noop),
                from => Err(TaskStoreError::InvalidStateTransition {
                    from,
                    to: TaskState::Running,
                }),
            })
            .await?;

        let started = receipt.before.state == TaskState::Pending;
        debug!(guid, cell_id, started, "task start reported");
        Ok(started)
    }

    /// Cancels a Pending or Running task.
    ///
    /// Returns the completed task and the cell it was previously bound to
    /// (empty when cancelled from Pending).
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::ResourceNotFound`] when absent or
    /// [`TaskStoreError::InvalidStateTransition`] when already terminal.
    pub async fn cancel_task(&self, guid: &str) -> TaskStoreResult<(Task, String)> {
        let now = self.now_ns();
        let receipt = self
            .transition(guid, move |record| match record.state {
                TaskState::Pending | TaskState::Running => Ok(TransitionDecision::Apply(
                    completion_mutation(true, CANCELLED_FAILURE_REASON, "", now),
                )),
                from => Err(TaskStoreError::InvalidStateTransition {
                    from,
                    to: TaskState::Completed,
                }),
            })
            .await?;

        debug!(guid, "task cancelled");
        let previous_cell = receipt.before.cell_id.clone();
        let task = self.decode(post_image(receipt)?)?;
        Ok((task, previous_cell))
    }

    /// Records a completion report from the bound cell.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::BadRequest`] for an oversize failure
    /// reason, [`TaskStoreError::ResourceNotFound`] when absent,
    /// [`TaskStoreError::RunningOnDifferentCell`] when another cell holds
    /// the binding, or [`TaskStoreError::InvalidStateTransition`] when the
    /// task is not Running.
    pub async fn complete_task(
        &self,
        guid: &str,
        cell_id: &str,
        failed: bool,
        failure_reason: &str,
        result: &str,
    ) -> TaskStoreResult<Task> {
        require_within_limit("failure_reason", failure_reason)?;

        let now = self.now_ns();
        let cell = cell_id.to_owned();
        let reason = failure_reason.to_owned();
        let result = result.to_owned();
        let receipt = self
            .transition(guid, move |record| match record.state {
                TaskState::Running if record.cell_id == cell => Ok(TransitionDecision::Apply(
                    completion_mutation(failed, &reason, &result, now),
                )),
                TaskState::Running => Err(TaskStoreError::RunningOnDifferentCell {
                    running_on: record.cell_id.clone(),
                    requested: cell,
                }),
                from => Err(TaskStoreError::InvalidStateTransition {
                    from,
                    to: TaskState::Completed,
                }),
            })
            .await?;

        debug!(guid, cell_id, failed, "task completed");
        self.decode(post_image(receipt)?)
    }

    /// Fails a Pending or Running task on behalf of the orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::BadRequest`] for an oversize failure
    /// reason, [`TaskStoreError::ResourceNotFound`] when absent, or
    /// [`TaskStoreError::InvalidStateTransition`] when already terminal.
    pub async fn fail_task(&self, guid: &str, failure_reason: &str) -> TaskStoreResult<Task> {
        require_within_limit("failure_reason", failure_reason)?;

        let now = self.now_ns();
        let reason = failure_reason.to_owned();
        let receipt = self
            .transition(guid, move |record| match record.state {
                TaskState::Pending | TaskState::Running => Ok(TransitionDecision::Apply(
                    completion_mutation(true, &reason, "", now),
                )),
                from => Err(TaskStoreError::InvalidStateTransition {
                    from,
                    to: TaskState::Completed,
                }),
            })
            .await?;

        debug!(guid, "task failed");
        self.decode(post_image(receipt)?)
    }

    /// Marks a Completed task's outcome as handed off to a consumer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::ResourceNotFound`] when absent or
    /// [`TaskStoreError::InvalidStateTransition`] from any state other than
    /// Completed, including Resolving itself.
    pub async fn resolving_task(&self, guid: &str) -> TaskStoreResult<()> {
        let now = self.now_ns();
        self.transition(guid, move |record| match record.state {
            TaskState::Completed => Ok(TransitionDecision::Apply(TaskMutation {
                state: Some(TaskState::Resolving),
                updated_at: Some(now),
                ..TaskMutation::default()
            })),
            from => Err(TaskStoreError::InvalidStateTransition {
                from,
                to: TaskState::Resolving,
            }),
        })
        .await?;

        debug!(guid, "task resolving");
        Ok(())
    }

    /// Deletes a Resolving task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::ResourceNotFound`] when absent, or
    /// [`TaskStoreError::InvalidStateTransition`] naming the observed state
    /// and the required Resolving state.
    pub async fn delete_task(&self, guid: &str) -> TaskStoreResult<()> {
        self.transition(guid, |record| match record.state {
            TaskState::Resolving => Ok(TransitionDecision::Remove),
            from => Err(TaskStoreError::InvalidStateTransition {
                from,
                to: TaskState::Resolving,
            }),
        })
        .await?;

        debug!(guid, "task deleted");
        Ok(())
    }

    async fn transition<F>(&self, guid: &str, decide: F) -> TaskStoreResult<TransitionReceipt>
    where
        F: FnOnce(&TaskRecord) -> TaskStoreResult<TransitionDecision> + Send + 'static,
    {
        self.repository.transition(guid, Box::new(decide)).await
    }

    fn decode(&self, record: TaskRecord) -> TaskStoreResult<Task> {
        let definition = self.codec.unmarshal(&record.definition)?;
        Ok(Task::from_record(record, definition))
    }

    fn now_ns(&self) -> i64 {
        self.clock.utc().timestamp_nanos_opt().unwrap_or(i64::MAX)
    }
}

/// Column assignments shared by every transition into Completed: the cell
/// binding is cleared and `first_completed_at` is frozen.
fn completion_mutation(failed: bool, failure_reason: &str, result: &str, now: i64) -> TaskMutation {
    TaskMutation {
        state: Some(TaskState::Completed),
        cell_id: Some(String::new()),
        updated_at: Some(now),
        first_completed_at: Some(now),
        failed: Some(failed),
        failure_reason: Some(failure_reason.to_owned()),
        result: Some(result.to_owned()),
    }
}

fn post_image(receipt: TransitionReceipt) -> TaskStoreResult<TaskRecord> {
    receipt.after.ok_or_else(|| {
        TaskStoreError::storage(std::io::Error::other(
            "transition unexpectedly removed the row",
        ))
    })
}
