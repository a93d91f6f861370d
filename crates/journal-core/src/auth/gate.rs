//! Startup gate: registration, then PIN, then entries.
//!
//! ```text
//! Unregistered --register--> AwaitingPin --unlock(ok)--> Authenticated
//!                                 ^   |
//!                                 +---+ unlock(wrong), failed_attempts += 1
//! ```
//!
//! `Authenticated` lasts for the lifetime of the gate; there is no logout.
//! Failed attempts are counted but never lock the gate.

use tracing::{debug, info};

use crate::auth::pin::{validate_new_pin, validate_pin_length, PinStorage};
use crate::error::{JournalError, Result, ValidationError};
use crate::models::User;
use crate::repository::{EntryRepository, UserRepository};
use crate::storage::RecordStore;

/// The account every journal uses.
pub const DEFAULT_USERNAME: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No user record yet
    Unregistered,
    /// A user exists; the PIN has not been entered
    AwaitingPin,
    /// PIN accepted; entries are available
    Authenticated,
}

/// Sign-up form contents.
#[derive(Clone)]
pub struct Registration {
    pub name: String,
    pub pin: String,
    pub confirm: String,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        pin: impl Into<String>,
        confirm: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pin: pin.into(),
            confirm: confirm.into(),
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("pin", &"[REDACTED]")
            .field("confirm", &"[REDACTED]")
            .finish()
    }
}

/// Access control in front of the entry repository.
pub struct Gate<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    users: UserRepository<'a, S>,
    username: String,
    state: GateState,
    failed_attempts: u32,
}

impl<'a, S: RecordStore + ?Sized> Gate<'a, S> {
    /// Gate for the default account with plaintext PIN storage.
    pub fn open(store: &'a S) -> Result<Self> {
        Self::with_options(store, DEFAULT_USERNAME, PinStorage::default())
    }

    /// Gate for `username`; the initial state comes from whether that user exists.
    pub fn with_options(
        store: &'a S,
        username: impl Into<String>,
        pin_storage: PinStorage,
    ) -> Result<Self> {
        let username = username.into();
        let users = UserRepository::with_pin_storage(store, pin_storage);
        let state = if users.has_user(&username)? {
            GateState::AwaitingPin
        } else {
            GateState::Unregistered
        };
        debug!(user = %username, ?state, "gate opened");

        Ok(Self {
            store,
            users,
            username,
            state,
            failed_attempts: 0,
        })
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Wrong PINs entered since the gate was opened.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Complete registration and move to `AwaitingPin`.
    ///
    /// The entered name is validated, but the record is stored under the
    /// gate's account name.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Validation` (nothing is written) if:
    /// - The name is blank
    /// - The PIN is shorter than 4 characters
    /// - A user with the entered name already exists
    /// - The confirmation differs from the PIN
    pub fn register(&mut self, registration: &Registration) -> Result<()> {
        self.require_state(GateState::Unregistered, "register")?;

        if registration.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        validate_pin_length(&registration.pin)?;
        if self.users.has_user(&registration.name)? {
            return Err(ValidationError::DuplicateUser(registration.name.clone()).into());
        }
        validate_new_pin(&registration.pin, &registration.confirm)?;

        self.users
            .create_user(&User::new(self.username.as_str(), registration.pin.as_str()))?;
        self.state = GateState::AwaitingPin;
        info!(user = %self.username, "registration complete");
        Ok(())
    }

    /// Try a PIN.
    ///
    /// # Returns
    ///
    /// Returns `Ok(true)` once authenticated. A wrong PIN returns `Ok(false)`,
    /// keeps the gate in `AwaitingPin` and bumps the attempt counter.
    pub fn unlock(&mut self, pin: &str) -> Result<bool> {
        match self.state {
            GateState::Authenticated => return Ok(true),
            GateState::Unregistered => {
                return Err(JournalError::InvalidState(
                    "cannot unlock before registration".to_string(),
                ))
            }
            GateState::AwaitingPin => {}
        }

        if self.users.authenticate(&self.username, pin)? {
            self.state = GateState::Authenticated;
            info!(user = %self.username, "unlocked");
            Ok(true)
        } else {
            self.failed_attempts += 1;
            debug!(attempts = self.failed_attempts, "incorrect pin");
            Ok(false)
        }
    }

    /// The entry repository, available only after a successful unlock.
    pub fn entries(&self) -> Result<EntryRepository<'a, S>> {
        if self.state != GateState::Authenticated {
            return Err(JournalError::Locked);
        }
        Ok(EntryRepository::new(self.store))
    }

    /// Replace the PIN of the signed-in account.
    pub fn change_pin(&self, pin: &str, confirm: &str) -> Result<()> {
        if self.state != GateState::Authenticated {
            return Err(JournalError::Locked);
        }
        validate_new_pin(pin, confirm)?;
        self.users
            .update_pin(&User::new(self.username.as_str(), pin))?;
        info!(user = %self.username, "pin changed");
        Ok(())
    }

    /// Give up on registration.
    ///
    /// The gate is consumed so nothing behind it can be reached; the returned
    /// error is meant to be propagated as a fatal exit.
    pub fn abandon_registration(self) -> JournalError {
        info!(user = %self.username, "registration abandoned");
        JournalError::RegistrationAbandoned
    }

    fn require_state(&self, expected: GateState, operation: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(JournalError::InvalidState(format!(
                "cannot {} while {:?}",
                operation, self.state
            )))
        }
    }
}
