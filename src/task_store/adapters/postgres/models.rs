//! Diesel row models for task persistence.

use super::schema::tasks;
use crate::task_store::domain::{TaskRecord, TaskState, TaskStoreError};
use crate::task_store::ports::TaskMutation;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Primary key.
    pub guid: String,
    /// Tenant label.
    pub domain: String,
    /// Creation instant in nanoseconds.
    pub created_at: i64,
    /// Last write instant in nanoseconds.
    pub updated_at: i64,
    /// First completion instant; zero until completion.
    pub first_completed_at: i64,
    /// Lifecycle state code.
    pub state: i32,
    /// Bound cell identifier.
    pub cell_id: String,
    /// Success payload; `NULL` reads back as empty.
    pub result: Option<String>,
    /// Terminal outcome flag.
    pub failed: bool,
    /// Failure cause.
    pub failure_reason: String,
    /// Definition payload bytes.
    pub task_definition: Vec<u8>,
}

impl TryFrom<TaskRow> for TaskRecord {
    type Error = TaskStoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let state = TaskState::try_from(row.state).map_err(TaskStoreError::storage)?;
        Ok(Self {
            guid: row.guid,
            domain: row.domain,
            state,
            cell_id: row.cell_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            first_completed_at: row.first_completed_at,
            failed: row.failed,
            failure_reason: row.failure_reason,
            result: row.result.unwrap_or_default(),
            definition: row.task_definition,
        })
    }
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Primary key.
    pub guid: String,
    /// Tenant label.
    pub domain: String,
    /// Creation instant in nanoseconds.
    pub created_at: i64,
    /// Last write instant in nanoseconds.
    pub updated_at: i64,
    /// First completion instant.
    pub first_completed_at: i64,
    /// Lifecycle state code.
    pub state: i32,
    /// Bound cell identifier.
    pub cell_id: String,
    /// Success payload.
    pub result: Option<String>,
    /// Terminal outcome flag.
    pub failed: bool,
    /// Failure cause.
    pub failure_reason: String,
    /// Definition payload bytes.
    pub task_definition: Vec<u8>,
}

impl From<TaskRecord> for NewTaskRow {
    fn from(record: TaskRecord) -> Self {
        Self {
            guid: record.guid,
            domain: record.domain,
            created_at: record.created_at,
            updated_at: record.updated_at,
            first_completed_at: record.first_completed_at,
            state: record.state.as_i32(),
            cell_id: record.cell_id,
            result: Some(record.result),
            failed: record.failed,
            failure_reason: record.failure_reason,
            task_definition: record.definition,
        }
    }
}

/// Update model for guarded transitions; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Lifecycle state code.
    pub state: Option<i32>,
    /// Bound cell identifier.
    pub cell_id: Option<String>,
    /// Last write instant.
    pub updated_at: Option<i64>,
    /// First completion instant.
    pub first_completed_at: Option<i64>,
    /// Terminal outcome flag.
    pub failed: Option<bool>,
    /// Failure cause.
    pub failure_reason: Option<String>,
    /// Success payload.
    pub result: Option<String>,
}

impl From<&TaskMutation> for TaskChangeset {
    fn from(mutation: &TaskMutation) -> Self {
        Self {
            state: mutation.state.map(TaskState::as_i32),
            cell_id: mutation.cell_id.clone(),
            updated_at: mutation.updated_at,
            first_completed_at: mutation.first_completed_at,
            failed: mutation.failed,
            failure_reason: mutation.failure_reason.clone(),
            result: mutation.result.clone(),
        }
    }
}
