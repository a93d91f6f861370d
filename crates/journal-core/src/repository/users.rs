//! User mapping over the `user` table, plus PIN checks.

use tracing::debug;

use crate::auth::pin::{verify_pin, PinStorage};
use crate::error::{JournalError, Result};
use crate::models::User;
use crate::storage::schema::user as cols;
use crate::storage::{Predicate, RecordStore, Row, Value};

/// Credential storage and authentication.
pub struct UserRepository<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    pin_storage: PinStorage,
}

impl<'a, S: RecordStore + ?Sized> UserRepository<'a, S> {
    /// Repository that writes PINs in plaintext.
    pub fn new(store: &'a S) -> Self {
        Self::with_pin_storage(store, PinStorage::default())
    }

    pub fn with_pin_storage(store: &'a S, pin_storage: PinStorage) -> Self {
        Self { store, pin_storage }
    }

    pub fn pin_storage(&self) -> PinStorage {
        self.pin_storage
    }

    /// Whether at least one user row has this name.
    pub fn has_user(&self, name: &str) -> Result<bool> {
        let rows = self.store.query(cols::NAME, &by_name(name))?;
        Ok(!rows.is_empty())
    }

    /// Check `pin` against the stored PIN for `name`.
    ///
    /// An unknown user is not an error; it simply fails authentication.
    pub fn authenticate(&self, name: &str, pin: &str) -> Result<bool> {
        let authenticated = match self.stored_pin(name)? {
            Some(stored) => verify_pin(self.pin_storage, &stored, pin),
            None => false,
        };
        debug!(user = name, authenticated, "authentication attempt");
        Ok(authenticated)
    }

    /// Insert a user row.
    ///
    /// Name collisions are not checked here; call [`has_user`](Self::has_user)
    /// first.
    pub fn create_user(&self, user: &User) -> Result<()> {
        let row = self.user_to_row(user)?;
        self.store.insert(cols::NAME, &row)?;
        debug!(user = %user.name, "created user");
        Ok(())
    }

    /// Replace the stored PIN of the user named `user.name`.
    pub fn update_pin(&self, user: &User) -> Result<()> {
        let row = self.user_to_row(user)?;
        let changed = self.store.update(cols::NAME, &row, &by_name(&user.name))?;
        debug!(user = %user.name, changed, "updated pin");
        Ok(())
    }

    /// Remove every user row with this name.
    pub fn delete_user(&self, name: &str) -> Result<()> {
        let removed = self.store.delete(cols::NAME, &by_name(name))?;
        debug!(user = name, removed, "deleted user");
        Ok(())
    }

    fn stored_pin(&self, name: &str) -> Result<Option<String>> {
        let rows = self.store.query(cols::NAME, &by_name(name))?;
        match rows.first() {
            Some(row) => match row.get(cols::PIN) {
                Some(Value::Text(pin)) => Ok(Some(pin.clone())),
                Some(Value::Null) | None => Ok(None),
                Some(other) => Err(JournalError::Storage(format!(
                    "Unexpected pin value for user {}: {:?}",
                    name, other
                ))),
            },
            None => Ok(None),
        }
    }

    fn user_to_row(&self, user: &User) -> Result<Row> {
        Ok(Row::new()
            .with(cols::USERNAME, user.name.as_str())
            .with(cols::PIN, self.pin_storage.encode(&user.pin)?))
    }
}

fn by_name(name: &str) -> Predicate {
    Predicate::eq(cols::USERNAME, name)
}
