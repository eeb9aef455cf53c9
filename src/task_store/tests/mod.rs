//! Unit tests for the task lifecycle store.

mod codec_tests;
