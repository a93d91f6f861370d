//! Record store trait definition.
//!
//! The `RecordStore` trait is the minimal table abstraction the repositories
//! are written against: insert, query, update and delete by predicate. The
//! repositories never issue SQL themselves.

use super::types::{Predicate, QueryResult, Row};
use crate::error::Result;

/// Table-oriented storage interface.
///
/// All implementations must ensure:
/// - Only columns of the table's fixed column set are accepted
/// - Each call is atomic with respect to the table it targets
/// - Query results come back in insertion order
pub trait RecordStore: Send + Sync {
    /// Append a row to `table`.
    ///
    /// No uniqueness is enforced; callers address rows through their own
    /// identifier columns.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Schema` for an unknown table or column, and
    /// `JournalError::Storage` if the write fails.
    fn insert(&self, table: &str, row: &Row) -> Result<()>;

    /// Fetch the rows of `table` matching `predicate`.
    ///
    /// Every column of the table is materialized for each row.
    fn query(&self, table: &str, predicate: &Predicate) -> Result<QueryResult>;

    /// Overwrite the columns present in `row` on every matching row.
    ///
    /// # Returns
    ///
    /// Returns the number of rows changed.
    fn update(&self, table: &str, row: &Row, predicate: &Predicate) -> Result<usize>;

    /// Remove every matching row.
    ///
    /// # Returns
    ///
    /// Returns the number of rows removed.
    fn delete(&self, table: &str, predicate: &Predicate) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn_store(_store: &dyn RecordStore) {}
    }
}
