//! Entry mapping over the `entry` table.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{JournalError, Result};
use crate::models::Entry;
use crate::storage::schema::entry as cols;
use crate::storage::{Predicate, RecordStore, Row, Value};

/// CRUD access to journal entries.
pub struct EntryRepository<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> EntryRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All entries, in the order they were added.
    pub fn list(&self) -> Result<Vec<Entry>> {
        let rows = self.store.query(cols::NAME, &Predicate::All)?;
        rows.iter().map(entry_from_row).collect()
    }

    /// Persist an entry that is not stored yet.
    ///
    /// There is no upsert: adding the same entry twice stores two rows.
    pub fn add(&self, entry: &Entry) -> Result<()> {
        self.store.insert(cols::NAME, &entry_to_row(entry))?;
        debug!(id = %entry.id, "added entry");
        Ok(())
    }

    /// Overwrite the stored copy of `entry`.
    ///
    /// The row is matched on `entry.id`; `id` is only compared against it.
    pub fn update(&self, id: &Uuid, entry: &Entry) -> Result<()> {
        if *id != entry.id {
            warn!(requested = %id, entry = %entry.id, "update id differs from entry id; matching on entry id");
        }

        let changed = self.store.update(
            cols::NAME,
            &entry_to_row(entry),
            &Predicate::eq(cols::UUID, entry.id.to_string()),
        )?;
        debug!(id = %entry.id, changed, "updated entry");
        Ok(())
    }

    /// Remove the entry with this id. Removing a missing id is a no-op.
    pub fn delete(&self, id: &Uuid) -> Result<()> {
        let removed = self
            .store
            .delete(cols::NAME, &Predicate::eq(cols::UUID, id.to_string()))?;
        debug!(id = %id, removed, "deleted entry");
        Ok(())
    }

    /// Get an entry by id.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(entry))` if found, `Ok(None)` if not found. If several
    /// rows share the id, the earliest one wins.
    pub fn get(&self, id: &Uuid) -> Result<Option<Entry>> {
        let rows = self
            .store
            .query(cols::NAME, &Predicate::eq(cols::UUID, id.to_string()))?;
        if rows.len() > 1 {
            warn!(id = %id, rows = rows.len(), "duplicate entry id in storage");
        }
        rows.first().map(entry_from_row).transpose()
    }
}

fn entry_to_row(entry: &Entry) -> Row {
    Row::new()
        .with(cols::UUID, entry.id.to_string())
        .with(cols::TITLE, entry.title.as_str())
        .with(cols::DATE, entry.date.timestamp_millis())
        .with(cols::CONTENT, entry.content.as_str())
}

fn entry_from_row(row: &Row) -> Result<Entry> {
    let id = match row.get(cols::UUID).and_then(Value::as_text) {
        Some(value) => Uuid::parse_str(value)
            .map_err(|e| JournalError::Storage(format!("Invalid entry UUID: {}", e)))?,
        None => return Err(JournalError::Storage("Entry row has no uuid".to_string())),
    };

    let millis = row
        .get(cols::DATE)
        .and_then(Value::as_integer)
        .ok_or_else(|| JournalError::Storage(format!("Entry {} has no date", id)))?;
    let date = DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| JournalError::Storage(format!("Entry {} date out of range", id)))?;

    Ok(Entry {
        id,
        title: text_or_empty(row, cols::TITLE),
        date,
        content: text_or_empty(row, cols::CONTENT),
    })
}

/// Text column value; `NULL` (written by older clients for blank fields) reads as empty.
fn text_or_empty(row: &Row, column: &str) -> String {
    row.get(column)
        .and_then(Value::as_text)
        .unwrap_or_default()
        .to_string()
}
