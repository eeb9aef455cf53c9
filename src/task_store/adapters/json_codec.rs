//! Versioned JSON envelope codec for task definitions.

use crate::task_store::domain::TaskDefinition;
use crate::task_store::ports::{CodecError, DefinitionCodec};
use serde::{Deserialize, Serialize};

/// Envelope version accepted by this codec.
const ENVELOPE_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct DefinitionEnvelope {
    v: u32,
    definition: TaskDefinition,
}

/// Codec persisting definitions as a versioned JSON envelope.
///
/// The version field lets a future codec revision change the payload layout
/// without guessing at the byte format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDefinitionCodec;

impl JsonDefinitionCodec {
    /// Creates the codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DefinitionCodec for JsonDefinitionCodec {
    fn marshal(&self, definition: &TaskDefinition) -> Result<Vec<u8>, CodecError> {
        let envelope = DefinitionEnvelope {
            v: ENVELOPE_VERSION,
            definition: definition.clone(),
        };
        serde_json::to_vec(&envelope).map_err(|err| CodecError::Encode(err.to_string()))
    }

    fn unmarshal(&self, payload: &[u8]) -> Result<TaskDefinition, CodecError> {
        let envelope: DefinitionEnvelope =
            serde_json::from_slice(payload).map_err(|err| CodecError::Decode(err.to_string()))?;
        if envelope.v != ENVELOPE_VERSION {
            return Err(CodecError::Decode(format!(
                "unsupported envelope version {}",
                envelope.v
            )));
        }
        Ok(envelope.definition)
    }
}
