//! `PostgreSQL` repository implementation for task lifecycle storage.
//!
//! Guarded transitions select the row `FOR UPDATE` inside a transaction,
//! so concurrent transitions on the same guid serialize at the database
//! and each decision sees the committed pre-image.

use super::models::{NewTaskRow, TaskChangeset, TaskRow};
use super::schema::tasks;
use crate::task_store::domain::{TaskFilter, TaskRecord, TaskStoreError};
use crate::task_store::ports::{
    TaskRepository, TransitionDecision, TransitionFn, TransitionReceipt,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Connection settings for the task store pool.
#[derive(Debug, Clone)]
pub struct PostgresStoreConfig {
    database_url: String,
    max_connections: u32,
}

impl PostgresStoreConfig {
    /// Creates a config with the default pool size.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Builds the connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Storage`] when the pool cannot be built.
    pub fn build_pool(&self) -> Result<TaskPgPool, TaskStoreError> {
        let manager = ConnectionManager::<PgConnection>::new(&self.database_url);
        Pool::builder()
            .max_size(self.max_connections)
            .build(manager)
            .map_err(TaskStoreError::storage)
    }
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by building a pool from the config.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Storage`] when the pool cannot be built.
    pub fn connect(config: &PostgresStoreConfig) -> Result<Self, TaskStoreError> {
        Ok(Self::new(config.build_pool()?))
    }

    async fn run_blocking<F, T>(&self, f: F) -> Result<T, TaskStoreError>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, TaskStoreError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::storage)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::storage)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, record: TaskRecord) -> Result<(), TaskStoreError> {
        let guid = record.guid.clone();
        let new_row = NewTaskRow::from(record);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::ResourceExists(guid.clone())
                    }
                    other => TaskStoreError::storage(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn select_by_guid(&self, guid: &str) -> Result<Option<TaskRecord>, TaskStoreError> {
        let guid = guid.to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::guid.eq(&guid))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::storage)?;
            row.map(TaskRecord::try_from).transpose()
        })
        .await
    }

    async fn select_all(&self, filter: &TaskFilter) -> Result<Vec<TaskRecord>, TaskStoreError> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if let Some(domain) = filter.domain() {
                query = query.filter(tasks::domain.eq(domain.to_owned()));
            }
            if let Some(cell_id) = filter.cell_id() {
                query = query.filter(tasks::cell_id.eq(cell_id.to_owned()));
            }

            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::storage)?;
            rows.into_iter().map(TaskRecord::try_from).collect()
        })
        .await
    }

    async fn transition(
        &self,
        guid: &str,
        decide: TransitionFn,
    ) -> Result<TransitionReceipt, TaskStoreError> {
        let guid = guid.to_owned();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskStoreError, _>(|tx| {
                let row = tasks::table
                    .filter(tasks::guid.eq(&guid))
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(tx)
                    .optional()?;
                let row = row.ok_or_else(|| TaskStoreError::ResourceNotFound(guid.clone()))?;
                let before = TaskRecord::try_from(row)?;

                match decide(&before)? {
                    TransitionDecision::Noop => Ok(TransitionReceipt {
                        after: Some(before.clone()),
                        before,
                    }),
                    TransitionDecision::Apply(mutation) => {
                        diesel::update(tasks::table.filter(tasks::guid.eq(&guid)))
                            .set(TaskChangeset::from(&mutation))
                            .execute(tx)?;
                        let mut after = before.clone();
                        mutation.apply_to(&mut after);
                        Ok(TransitionReceipt {
                            before,
                            after: Some(after),
                        })
                    }
                    TransitionDecision::Remove => {
                        diesel::delete(tasks::table.filter(tasks::guid.eq(&guid))).execute(tx)?;
                        Ok(TransitionReceipt {
                            before,
                            after: None,
                        })
                    }
                }
            })
        })
        .await
    }
}
