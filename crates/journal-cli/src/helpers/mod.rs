//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - PIN prompting and entry content reading (`input`)
//! - Datetime and entry ID parsing (`parsing`)

mod input;
mod parsing;

// Re-export public API
pub use input::{confirm, env_pin, env_value, prompt_name, prompt_new_pin, prompt_pin, read_content};
pub use parsing::{apply_date_time, parse_date, parse_entry_id, parse_time};
