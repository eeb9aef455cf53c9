//! Adapter implementations of the task store ports.

pub mod json_codec;
pub mod memory;
pub mod postgres;
