//! `PostgreSQL` adapters for task lifecycle persistence.

mod error_map;
mod models;
mod repository;
mod schema;

pub use repository::{PostgresStoreConfig, PostgresTaskRepository, TaskPgPool};

#[cfg(test)]
pub(crate) use models::{NewTaskRow, TaskChangeset, TaskRow};
