//! Codec port for the opaque task definition payload.

use crate::task_store::domain::{TaskDefinition, TaskStoreError};
use thiserror::Error;

/// Errors returned by definition codecs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The definition could not be encoded.
    #[error("failed to encode task definition: {0}")]
    Encode(String),

    /// The payload bytes are not valid codec output.
    #[error("failed to decode task definition: {0}")]
    Decode(String),
}

impl From<CodecError> for TaskStoreError {
    fn from(err: CodecError) -> Self {
        Self::Deserialize(err.to_string())
    }
}

/// Serialization contract for task definition payloads.
///
/// The store treats codec output as opaque bytes: the state machine never
/// inspects or rewrites a persisted payload. Encoding is infallible for
/// well-formed definitions; the `Result` propagates serializer failure.
pub trait DefinitionCodec: Send + Sync {
    /// Serializes a definition to its persisted byte form.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] when the serializer rejects the
    /// definition.
    fn marshal(&self, definition: &TaskDefinition) -> Result<Vec<u8>, CodecError>;

    /// Deserializes persisted bytes back into a definition.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] when the bytes are not valid codec
    /// output.
    fn unmarshal(&self, payload: &[u8]) -> Result<TaskDefinition, CodecError>;
}
