//! Table layout of the journal database.
//!
//! Table and column names are part of the on-disk format and must not change.
//! Each table also carries an internal `_id INTEGER PRIMARY KEY AUTOINCREMENT`
//! row id that is never exposed to callers.

use crate::error::{JournalError, Result};

/// The only schema version that has ever existed.
pub const SCHEMA_VERSION: i64 = 1;

/// Default database filename.
pub const DATABASE_NAME: &str = "journal_database.db";

/// Name and column set of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

/// A column and its declared SQLite type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
}

impl TableSchema {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for this table.
    pub fn create_sql(&self) -> String {
        let mut columns = vec!["_id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
        columns.extend(
            self.columns
                .iter()
                .map(|column| format!("{} {}", column.name, column.sql_type)),
        );
        format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
            self.name,
            columns.join(", ")
        )
    }
}

/// Journal entries.
pub mod entry {
    use super::{Column, TableSchema};

    pub const NAME: &str = "entry";
    pub const UUID: &str = "uuid";
    pub const TITLE: &str = "title";
    pub const DATE: &str = "date";
    pub const CONTENT: &str = "content";

    pub const TABLE: TableSchema = TableSchema {
        name: NAME,
        columns: &[
            Column { name: UUID, sql_type: "TEXT" },
            Column { name: TITLE, sql_type: "TEXT" },
            Column { name: DATE, sql_type: "INTEGER" },
            Column { name: CONTENT, sql_type: "TEXT" },
        ],
    };
}

/// Login credentials.
pub mod user {
    use super::{Column, TableSchema};

    pub const NAME: &str = "user";
    pub const USERNAME: &str = "username";
    pub const PIN: &str = "pin";

    pub const TABLE: TableSchema = TableSchema {
        name: NAME,
        columns: &[
            Column { name: USERNAME, sql_type: "TEXT" },
            Column { name: PIN, sql_type: "TEXT" },
        ],
    };
}

/// Every table in the database.
pub const TABLES: &[TableSchema] = &[entry::TABLE, user::TABLE];

/// Look up a table by name.
pub fn table(name: &str) -> Result<&'static TableSchema> {
    TABLES
        .iter()
        .find(|table| table.name == name)
        .ok_or_else(|| JournalError::Schema(format!("Unknown table: {}", name)))
}

/// Check that every column belongs to the table.
pub fn validate_columns<'c>(
    table: &TableSchema,
    columns: impl IntoIterator<Item = &'c str>,
) -> Result<()> {
    for column in columns {
        if !table.has_column(column) {
            return Err(JournalError::Schema(format!(
                "Unknown column \"{}\" in table \"{}\"",
                column, table.name
            )));
        }
    }
    Ok(())
}
