//! Domain model for the task lifecycle store.
//!
//! The domain models a task's progression through the lifecycle DAG
//! (`Pending → Running → Completed → Resolving → deleted`), the opaque
//! definition payload, and the filter surface, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod definition;
mod error;
mod fields;
mod filter;
mod task;

pub use definition::{EnvironmentVariable, ResourceRequirements, TaskDefinition};
pub use error::{ParseTaskStateError, TaskStoreError, TaskStoreResult};
pub use fields::{MAX_FIELD_LENGTH, require_identifier, require_within_limit};
pub use filter::TaskFilter;
pub use task::{Task, TaskRecord, TaskState};
