//! Journal entries and login users.
//!
//! These are transient values: repositories materialize them from rows on
//! read and nothing is persisted until the caller explicitly adds or updates.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, fixed at creation
    pub id: Uuid,

    /// Free-form title, may be empty
    pub title: String,

    /// Entry timestamp, whole milliseconds
    pub date: DateTime<Utc>,

    /// Free-form body, may be empty
    pub content: String,
}

impl Entry {
    /// A new entry with a fresh id, dated now.
    pub fn new() -> Self {
        Self::from_id(Uuid::new_v4())
    }

    /// An entry with a known id, dated now. Used when rebuilding from storage.
    pub fn from_id(id: Uuid) -> Self {
        Self {
            id,
            title: String::new(),
            date: truncate_to_millis(Utc::now()),
            content: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.set_date(date);
        self
    }

    /// Change the timestamp. Sub-millisecond precision is dropped so that the
    /// stored value reads back identical.
    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = truncate_to_millis(date);
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop everything below one millisecond.
pub fn truncate_to_millis(date: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = date.nanosecond();
    date.with_nanosecond(nanos - nanos % 1_000_000).unwrap_or(date)
}

/// Login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub pin: String,
}

impl User {
    pub fn new(name: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pin: pin.into(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("pin", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_entry_defaults() {
        let entry = Entry::new();
        assert!(entry.title.is_empty());
        assert!(entry.content.is_empty());
        assert_eq!(entry.date.nanosecond() % 1_000_000, 0);
        assert!(!entry.id.is_nil());
    }

    #[test]
    fn test_entry_builder() {
        let date = Utc.with_ymd_and_hms(2019, 3, 14, 9, 26, 53).unwrap();
        let entry = Entry::new()
            .with_title("Pi day")
            .with_content("Ate pie")
            .with_date(date);

        assert_eq!(entry.title, "Pi day");
        assert_eq!(entry.content, "Ate pie");
        assert_eq!(entry.date, date);
    }

    #[test]
    fn test_set_date_drops_sub_millisecond_precision() {
        let precise = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let mut entry = Entry::new();
        entry.set_date(precise);

        assert_eq!(entry.date.timestamp_millis(), precise.timestamp_millis());
        assert_eq!(entry.date.nanosecond(), 123_000_000);
    }

    #[test]
    fn test_user_debug_redacts_pin() {
        let user = User::new("user", "8642");
        let debug_output = format!("{:?}", user);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("8642"));
    }
}
