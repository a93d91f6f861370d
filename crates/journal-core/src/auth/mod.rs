//! Authentication for Journal.
//!
//! - **pin**: PIN validation rules and how PINs are written to storage
//! - **gate**: the registration / PIN state machine guarding the entries
//!
//! ## Security Model
//!
//! The PIN keeps casual readers out of the application; it does not encrypt
//! anything. By default it is stored in plaintext for compatibility with
//! existing databases. `PinStorage::Argon2` stores a salted hash instead.

pub mod gate;
pub mod pin;

pub use gate::{Gate, GateState, Registration, DEFAULT_USERNAME};
pub use pin::{validate_new_pin, validate_pin_length, verify_pin, PinStorage, MIN_PIN_LENGTH};
