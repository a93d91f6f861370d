//! SQLite storage backend.
//!
//! One database file holds both tables. The connection is owned by the
//! `SqliteStore` value the application constructs at startup and closes at
//! shutdown; repositories borrow it.

mod statement;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params_from_iter, Connection};
use tracing::debug;

use crate::error::{JournalError, Result};
use crate::storage::schema::{self, SCHEMA_VERSION, TABLES};
use crate::storage::traits::RecordStore;
use crate::storage::types::{Predicate, QueryResult, Row, Value};

/// SQLite-backed record store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    ///
    /// Missing parent directories and tables are created.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Schema` if the file was written by a newer
    /// schema version, and `JournalError::Storage` for any I/O or SQLite
    /// failure.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::initialize(conn, Some(path.to_path_buf()))
    }

    /// Open a store that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn, None)
    }

    fn initialize(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if version > SCHEMA_VERSION {
            return Err(JournalError::Schema(format!(
                "Unsupported schema version {} (expected {})",
                version, SCHEMA_VERSION
            )));
        }

        for table in TABLES {
            conn.execute_batch(&table.create_sql())?;
        }
        if version == 0 {
            conn.execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))?;
        }

        debug!(path = ?path, "opened journal database");
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| JournalError::Storage("SQLite connection poisoned".to_string()))
    }

    /// Location of the database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the connection, surfacing any error SQLite reports on shutdown.
    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| JournalError::Storage("SQLite connection poisoned".to_string()))?;
        conn.close().map_err(|(_, err)| JournalError::from(err))?;
        debug!(path = ?self.path, "closed journal database");
        Ok(())
    }

    /// Run SQLite's integrity check.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if the database is valid, or a `Storage` error listing
    /// the problems SQLite found.
    pub fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("PRAGMA integrity_check")?;
        let messages = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if messages.len() == 1 && messages[0] == "ok" {
            Ok(())
        } else {
            Err(JournalError::Storage(format!(
                "Integrity check failed: {}",
                messages.join("; ")
            )))
        }
    }

    /// Row count of every table, in schema order.
    pub fn counts(&self) -> Result<Vec<(&'static str, i64)>> {
        let conn = self.lock_conn()?;
        let mut counts = Vec::with_capacity(TABLES.len());
        for table in TABLES {
            let count: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM \"{}\"", table.name),
                [],
                |row| row.get(0),
            )?;
            counts.push((table.name, count));
        }
        Ok(counts)
    }
}

impl RecordStore for SqliteStore {
    fn insert(&self, table: &str, row: &Row) -> Result<()> {
        let table = schema::table(table)?;
        let stmt = statement::insert(table, row)?;
        let conn = self.lock_conn()?;
        conn.execute(&stmt.sql, params_from_iter(stmt.params.iter()))?;
        debug!(table = table.name, "inserted row");
        Ok(())
    }

    fn query(&self, table: &str, predicate: &Predicate) -> Result<QueryResult> {
        let table = schema::table(table)?;
        let stmt = statement::select(table, predicate)?;
        let conn = self.lock_conn()?;

        let mut prepared = conn.prepare(&stmt.sql)?;
        let rows = prepared.query_map(params_from_iter(stmt.params.iter()), |sql_row| {
            let mut row = Row::new();
            for (index, column) in table.columns.iter().enumerate() {
                row.set(column.name, sql_row.get::<_, Value>(index)?);
            }
            Ok(row)
        })?;

        let mut materialized = Vec::new();
        for row in rows {
            materialized.push(row?);
        }

        debug!(table = table.name, rows = materialized.len(), "queried rows");
        Ok(QueryResult::new(materialized))
    }

    fn update(&self, table: &str, row: &Row, predicate: &Predicate) -> Result<usize> {
        let table = schema::table(table)?;
        let stmt = statement::update(table, row, predicate)?;
        let conn = self.lock_conn()?;
        let changed = conn.execute(&stmt.sql, params_from_iter(stmt.params.iter()))?;
        debug!(table = table.name, changed, "updated rows");
        Ok(changed)
    }

    fn delete(&self, table: &str, predicate: &Predicate) -> Result<usize> {
        let table = schema::table(table)?;
        let stmt = statement::delete(table, predicate)?;
        let conn = self.lock_conn()?;
        let removed = conn.execute(&stmt.sql, params_from_iter(stmt.params.iter()))?;
        debug!(table = table.name, removed, "deleted rows");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::{entry, user};

    fn user_row(name: &str, pin: &str) -> Row {
        Row::new()
            .with(user::USERNAME, name)
            .with(user::PIN, pin)
    }

    #[test]
    fn test_insert_then_query_all_in_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(user::NAME, &user_row("b", "2222")).unwrap();
        store.insert(user::NAME, &user_row("a", "1111")).unwrap();

        let rows = store.query(user::NAME, &Predicate::All).unwrap();
        let names: Vec<_> = rows
            .iter()
            .map(|row| row.get(user::USERNAME).and_then(Value::as_text).unwrap())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_query_materializes_every_column() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert(entry::NAME, &Row::new().with(entry::UUID, "x"))
            .unwrap();

        let rows = store.query(entry::NAME, &Predicate::All).unwrap();
        let row = rows.first().unwrap();
        assert_eq!(row.len(), 4);
        assert!(row.get(entry::TITLE).unwrap().is_null());
    }

    #[test]
    fn test_update_and_delete_report_counts() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(user::NAME, &user_row("user", "1234")).unwrap();
        store.insert(user::NAME, &user_row("user", "5678")).unwrap();
        store.insert(user::NAME, &user_row("other", "0000")).unwrap();

        let changed = store
            .update(
                user::NAME,
                &Row::new().with(user::PIN, "9999"),
                &Predicate::eq(user::USERNAME, "user"),
            )
            .unwrap();
        assert_eq!(changed, 2);

        let removed = store
            .delete(user::NAME, &Predicate::eq(user::USERNAME, "user"))
            .unwrap();
        assert_eq!(removed, 2);

        let remaining = store.query(user::NAME, &Predicate::All).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(
            remaining.first().unwrap().get(user::PIN),
            Some(&Value::Text("0000".to_string()))
        );
    }

    #[test]
    fn test_unknown_table_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        let result = store.query("entries", &Predicate::All);
        assert!(matches!(result, Err(JournalError::Schema(_))));
    }

    #[test]
    fn test_unknown_column_rejected_before_write() {
        let store = SqliteStore::open_in_memory().unwrap();
        let row = Row::new().with("body", "text");
        assert!(matches!(
            store.insert(entry::NAME, &row),
            Err(JournalError::Schema(_))
        ));
        assert!(store.query(entry::NAME, &Predicate::All).unwrap().is_empty());
    }

    #[test]
    fn test_integrity_and_counts() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(user::NAME, &user_row("user", "1234")).unwrap();

        store.check_integrity().unwrap();
        assert_eq!(store.counts().unwrap(), vec![("entry", 0), ("user", 1)]);
        assert!(store.path().is_none());
        store.close().unwrap();
    }
}
