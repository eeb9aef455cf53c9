//! Length validation for persisted string fields.
//!
//! The schema caps `guid`, `domain`, `cell_id`, and `failure_reason` at 255
//! bytes. Violations are rejected as [`TaskStoreError::BadRequest`] before
//! any transaction is opened, so a failed validation never touches the row.

use super::error::TaskStoreError;

/// Maximum byte length of persisted string fields.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Validates an identifier field: non-empty and within the length limit.
///
/// # Errors
///
/// Returns [`TaskStoreError::BadRequest`] naming the offending field.
pub fn require_identifier(field: &str, value: &str) -> Result<(), TaskStoreError> {
    if value.is_empty() {
        return Err(TaskStoreError::BadRequest(format!(
            "{field} must not be empty"
        )));
    }
    require_within_limit(field, value)
}

/// Validates a field that may be empty but must stay within the length
/// limit.
///
/// # Errors
///
/// Returns [`TaskStoreError::BadRequest`] naming the offending field.
pub fn require_within_limit(field: &str, value: &str) -> Result<(), TaskStoreError> {
    if value.len() > MAX_FIELD_LENGTH {
        return Err(TaskStoreError::BadRequest(format!(
            "{field} must be at most {MAX_FIELD_LENGTH} bytes"
        )));
    }
    Ok(())
}
