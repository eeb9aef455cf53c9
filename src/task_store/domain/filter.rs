//! Filter options for task listing.

use super::task::TaskRecord;

/// Recognized filter options for enumerating tasks.
///
/// Options combine with logical AND; the empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    domain: Option<String>,
    cell_id: Option<String>,
}

impl TaskFilter {
    /// Creates an empty filter matching all tasks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts matches to the given domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Restricts matches to tasks bound to the given cell.
    #[must_use]
    pub fn with_cell_id(mut self, cell_id: impl Into<String>) -> Self {
        self.cell_id = Some(cell_id.into());
        self
    }

    /// Returns the domain restriction, if any.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Returns the cell restriction, if any.
    #[must_use]
    pub fn cell_id(&self) -> Option<&str> {
        self.cell_id.as_deref()
    }

    /// Reports whether the record satisfies every set option.
    #[must_use]
    pub fn matches(&self, record: &TaskRecord) -> bool {
        self.domain.as_deref().is_none_or(|d| record.domain == d)
            && self.cell_id.as_deref().is_none_or(|c| record.cell_id == c)
    }
}
