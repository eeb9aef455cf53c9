//! Application services for the task lifecycle state machine.

mod lifecycle;

pub use lifecycle::{CANCELLED_FAILURE_REASON, TaskLifecycleService};
