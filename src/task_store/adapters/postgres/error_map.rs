//! Maps Diesel errors into the task store taxonomy.
//!
//! Unique-key violations become [`TaskStoreError::ResourceExists`], no-row
//! results become [`TaskStoreError::ResourceNotFound`], and anything else
//! surfaces as a wrapped storage error. Call sites that know the guid map
//! these two cases themselves to attach it; this impl is the fallback used
//! by `?` inside transactions.

use crate::task_store::domain::TaskStoreError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

impl From<DieselError> for TaskStoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::ResourceNotFound(String::new()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::ResourceExists(info.message().to_owned())
            }
            other => Self::storage(other),
        }
    }
}
