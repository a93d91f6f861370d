//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying entries
//! as JSON or human-readable text.

mod json;
mod text;

// Re-export public API
pub use json::{entries_json, entry_json};
pub use text::{print_entry, print_entry_list};
