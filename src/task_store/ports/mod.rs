//! Port contracts for the task lifecycle store.
//!
//! Ports define infrastructure-agnostic interfaces used by the lifecycle
//! service.

pub mod codec;
pub mod repository;

pub use codec::{CodecError, DefinitionCodec};
pub use repository::{
    TaskMutation, TaskRepository, TransitionDecision, TransitionFn, TransitionReceipt,
};
