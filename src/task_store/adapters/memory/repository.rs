//! In-memory repository for task lifecycle tests.
//!
//! Holding the write lock for the whole read-decide-write sequence gives
//! the same per-guid serialization the relational adapter gets from its
//! locking read.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task_store::domain::{TaskFilter, TaskRecord, TaskStoreError};
use crate::task_store::ports::{
    TaskRepository, TransitionDecision, TransitionFn, TransitionReceipt,
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    records: Arc<RwLock<HashMap<String, TaskRecord>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, record: TaskRecord) -> Result<(), TaskStoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.contains_key(&record.guid) {
            return Err(TaskStoreError::ResourceExists(record.guid));
        }
        records.insert(record.guid.clone(), record);
        Ok(())
    }

    async fn select_by_guid(&self, guid: &str) -> Result<Option<TaskRecord>, TaskStoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(guid).cloned())
    }

    async fn select_all(&self, filter: &TaskFilter) -> Result<Vec<TaskRecord>, TaskStoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn transition(
        &self,
        guid: &str,
        decide: TransitionFn,
    ) -> Result<TransitionReceipt, TaskStoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let before = records
            .get(guid)
            .cloned()
            .ok_or_else(|| TaskStoreError::ResourceNotFound(guid.to_owned()))?;

        match decide(&before)? {
            TransitionDecision::Noop => Ok(TransitionReceipt {
                after: Some(before.clone()),
                before,
            }),
            TransitionDecision::Apply(mutation) => {
                let mut after = before.clone();
                mutation.apply_to(&mut after);
                records.insert(guid.to_owned(), after.clone());
                Ok(TransitionReceipt {
                    before,
                    after: Some(after),
                })
            }
            TransitionDecision::Remove => {
                records.remove(guid);
                Ok(TransitionReceipt {
                    before,
                    after: None,
                })
            }
        }
    }
}
