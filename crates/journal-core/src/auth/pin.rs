//! PIN validation and storage encoding.
//!
//! PINs are stored verbatim by default so existing databases keep working.
//! The `Argon2` mode stores a salted argon2 PHC string instead; verification
//! accepts both forms.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result, ValidationError};

/// Minimum PIN length in characters.
pub const MIN_PIN_LENGTH: usize = 4;

/// Salt length in bytes for hashed PINs.
const SALT_LENGTH: usize = 16;

/// How PINs are written to the `pin` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinStorage {
    /// The PIN itself (compatible with every existing database)
    #[default]
    Plaintext,
    /// Argon2id PHC string with a random salt
    Argon2,
}

impl PinStorage {
    /// Produce the value stored in the `pin` column.
    pub fn encode(&self, pin: &str) -> Result<String> {
        match self {
            PinStorage::Plaintext => Ok(pin.to_string()),
            PinStorage::Argon2 => {
                let mut salt = [0u8; SALT_LENGTH];
                getrandom::getrandom(&mut salt)
                    .map_err(|e| JournalError::Crypto(format!("Salt generation failed: {}", e)))?;
                let salt = SaltString::encode_b64(&salt)?;
                let hash = Argon2::default().hash_password(pin.as_bytes(), &salt)?;
                Ok(hash.to_string())
            }
        }
    }
}

/// Compare a supplied PIN against the stored column value.
///
/// In `Plaintext` mode an exact match always succeeds, and stored argon2
/// hashes are also verified so switching modes back never locks anyone out.
/// In `Argon2` mode a stored hash is only ever checked with argon2, so the
/// hash string itself is not a valid PIN; non-hash values (written before the
/// switch) must match exactly.
pub fn verify_pin(storage: PinStorage, stored: &str, supplied: &str) -> bool {
    if storage == PinStorage::Plaintext && stored == supplied {
        return true;
    }
    match argon2_hash(stored) {
        Some(hash) => Argon2::default()
            .verify_password(supplied.as_bytes(), &hash)
            .is_ok(),
        None => stored == supplied,
    }
}

fn argon2_hash(stored: &str) -> Option<PasswordHash<'_>> {
    PasswordHash::new(stored)
        .ok()
        .filter(|hash| hash.algorithm.as_str().starts_with("argon2"))
}

/// Check the minimum PIN length (in characters).
pub fn validate_pin_length(pin: &str) -> Result<()> {
    if pin.chars().count() < MIN_PIN_LENGTH {
        return Err(ValidationError::PinTooShort {
            min: MIN_PIN_LENGTH,
        }
        .into());
    }
    Ok(())
}

/// Validate a new PIN and its confirmation.
///
/// # Requirements
///
/// - At least 4 characters long
/// - Confirmation identical to the PIN
pub fn validate_new_pin(pin: &str, confirm: &str) -> Result<()> {
    validate_pin_length(pin)?;
    if pin != confirm {
        return Err(ValidationError::PinMismatch.into());
    }
    Ok(())
}
