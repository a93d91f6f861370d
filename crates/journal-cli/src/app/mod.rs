//! Application-level utilities for the Journal CLI.
//!
//! This module provides:
//! - Path resolution for config and journal files
//! - The per-invocation context (config, open store)
//! - PIN entry with retry logic

mod context;
mod resolver;
mod unlock;

// Re-export public API
pub use context::AppContext;
pub use resolver::{load_config, resolve_config_path};
pub use unlock::unlock_gate;
