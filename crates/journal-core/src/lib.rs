//! # Journal Core
//!
//! Core library for Journal - a PIN-protected, single-user personal journal.
//!
//! This crate provides the persistence layer and the authentication gate,
//! independent of any user interface.
//!
//! ## Architecture
//!
//! - **storage**: Record store trait and the SQLite implementation
//! - **models**: Entry and User values
//! - **repository**: Entry and user mapping over the record store
//! - **auth**: PIN validation/hashing and the startup gate

pub mod auth;
pub mod error;
pub mod models;
pub mod repository;
pub mod storage;

pub use auth::{Gate, GateState, PinStorage, Registration, DEFAULT_USERNAME};
pub use error::{JournalError, Result, ValidationError};
pub use models::{Entry, User};
pub use repository::{EntryRepository, UserRepository};
pub use storage::{RecordStore, SqliteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
