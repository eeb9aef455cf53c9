//! Persistent task lifecycle store.
//!
//! Tracks each task from submission through execution on a cell to terminal
//! resolution and deletion. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The lifecycle state machine in [`services`]
//!
//! Every guarded transition runs its read and write inside a single
//! transaction with a row-level locking read, so concurrent operations on
//! the same guid observe each other's effects.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
