//! Unit tests for the JSON definition codec.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::task_store::adapters::json_codec::JsonDefinitionCodec;
use crate::task_store::domain::{EnvironmentVariable, ResourceRequirements, TaskDefinition};
use crate::task_store::ports::{CodecError, DefinitionCodec};
use rstest::{fixture, rstest};

#[fixture]
fn codec() -> JsonDefinitionCodec {
    JsonDefinitionCodec::new()
}

fn sample_definition() -> TaskDefinition {
    TaskDefinition::new("preloaded:trusty", "/bin/run")
        .with_args(vec!["--once".to_owned(), "--verbose".to_owned()])
        .with_environment(vec![EnvironmentVariable::new("PORT", "8080")])
        .with_resources(ResourceRequirements::new(256, 1024, 10))
}

#[rstest]
fn marshal_unmarshal_round_trips(codec: JsonDefinitionCodec) {
    let definition = sample_definition();
    let payload = codec.marshal(&definition).expect("marshal should succeed");
    let decoded = codec.unmarshal(&payload).expect("unmarshal should succeed");
    assert_eq!(decoded, definition);
}

#[rstest]
fn unmarshal_rejects_malformed_bytes(codec: JsonDefinitionCodec) {
    let result = codec.unmarshal(b"{{{{{{{{{{");
    assert!(matches!(result, Err(CodecError::Decode(_))));
}

#[rstest]
fn unmarshal_rejects_empty_payload(codec: JsonDefinitionCodec) {
    let result = codec.unmarshal(b"");
    assert!(matches!(result, Err(CodecError::Decode(_))));
}

#[rstest]
fn unmarshal_rejects_unknown_envelope_version(codec: JsonDefinitionCodec) {
    let definition = sample_definition();
    let payload = codec.marshal(&definition).expect("marshal should succeed");
    let text = String::from_utf8(payload).expect("payload is JSON text");
    let bumped = text.replacen("\"v\":0", "\"v\":9", 1);

    let result = codec.unmarshal(bumped.as_bytes());
    let Err(CodecError::Decode(message)) = result else {
        panic!("expected a decode error, got {result:?}");
    };
    assert!(message.contains("unsupported envelope version"));
}
