//! Task aggregate root and related lifecycle types.

use super::{ParseTaskStateError, TaskDefinition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
///
/// States progress monotonically through the lifecycle DAG: `Pending →
/// {Running, Completed}`, `Running → Completed`, `Completed → Resolving`,
/// `Resolving → deleted`. There are no cycles and no other edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Submitted but not yet placed on a cell.
    Pending,
    /// Executing on the bound cell.
    Running,
    /// Finished with a terminal outcome; awaiting handoff to a consumer.
    Completed,
    /// Outcome handed off; eligible for deletion.
    Resolving,
}

impl TaskState {
    /// Returns the persisted state code.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Running => 1,
            Self::Completed => 2,
            Self::Resolving => 3,
        }
    }

    /// Returns the canonical display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Resolving => "resolving",
        }
    }

    /// Reports whether the state is terminal (the cell binding is cleared
    /// and `first_completed_at` is frozen).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Resolving)
    }
}

impl TryFrom<i32> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Running),
            2 => Ok(Self::Completed),
            3 => Ok(Self::Resolving),
            other => Err(ParseTaskStateError(other)),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted image of a task row.
///
/// The definition payload stays in its codec-produced byte form; decoding
/// happens at the service boundary. `guid`, `domain`, `created_at`, and
/// `definition` are written once at creation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Primary key, unique across the relation.
    pub guid: String,
    /// Free-form tenant label.
    pub domain: String,
    /// Lifecycle state.
    pub state: TaskState,
    /// Cell currently or most recently responsible; empty when unbound.
    pub cell_id: String,
    /// Creation instant, nanoseconds since epoch.
    pub created_at: i64,
    /// Last write instant, nanoseconds since epoch.
    pub updated_at: i64,
    /// First completion instant; zero until the row enters `Completed`.
    pub first_completed_at: i64,
    /// Terminal outcome flag; meaningful only in `Completed`.
    pub failed: bool,
    /// Human-readable cause when `failed`; empty otherwise.
    pub failure_reason: String,
    /// Opaque success payload; empty on failure or cancellation.
    pub result: String,
    /// Codec-produced serialization of the task definition.
    pub definition: Vec<u8>,
}

/// Task aggregate root with the definition payload decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    guid: String,
    domain: String,
    state: TaskState,
    cell_id: String,
    created_at: i64,
    updated_at: i64,
    first_completed_at: i64,
    failed: bool,
    failure_reason: String,
    result: String,
    definition: TaskDefinition,
}

impl Task {
    /// Reconstructs a task from its persisted record and decoded definition.
    #[must_use]
    pub fn from_record(record: TaskRecord, definition: TaskDefinition) -> Self {
        let TaskRecord {
            guid,
            domain,
            state,
            cell_id,
            created_at,
            updated_at,
            first_completed_at,
            failed,
            failure_reason,
            result,
            definition: _,
        } = record;
        Self {
            guid,
            domain,
            state,
            cell_id,
            created_at,
            updated_at,
            first_completed_at,
            failed,
            failure_reason,
            result,
            definition,
        }
    }

    /// Returns the task guid.
    #[must_use]
    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// Returns the tenant domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the bound cell identifier; empty when unbound.
    #[must_use]
    pub fn cell_id(&self) -> &str {
        &self.cell_id
    }

    /// Returns the creation instant in nanoseconds since epoch.
    #[must_use]
    pub const fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Returns the last write instant in nanoseconds since epoch.
    #[must_use]
    pub const fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Returns the first completion instant; zero before completion.
    #[must_use]
    pub const fn first_completed_at(&self) -> i64 {
        self.first_completed_at
    }

    /// Reports whether the task completed unsuccessfully.
    #[must_use]
    pub const fn failed(&self) -> bool {
        self.failed
    }

    /// Returns the failure cause; empty unless `failed`.
    #[must_use]
    pub fn failure_reason(&self) -> &str {
        &self.failure_reason
    }

    /// Returns the opaque success payload.
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Returns the decoded task definition.
    #[must_use]
    pub const fn definition(&self) -> &TaskDefinition {
        &self.definition
    }
}
