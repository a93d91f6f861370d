//! Storage abstraction for Journal.
//!
//! This module defines the `RecordStore` trait and the types it moves around
//! (rows, values, predicates), plus the SQLite implementation.
//!
//! ## Layout
//!
//! Two tables in one SQLite file, `entry` and `user`, with the fixed column
//! sets declared in [`schema`].

pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use sqlite::SqliteStore;
pub use traits::RecordStore;
pub use types::{Predicate, QueryResult, Row, Value};
