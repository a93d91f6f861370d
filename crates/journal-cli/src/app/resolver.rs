//! Path resolution for config and journal files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_journal_path, read_config, JournalConfig};
use crate::constants::CONFIG_ENV;
use crate::errors::CliError;

/// Resolve the config file path, checking JOURNAL_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file; a missing file yields the defaults.
pub fn load_config() -> anyhow::Result<JournalConfig> {
    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        return Ok(JournalConfig::default());
    }
    read_config(&config_path)
}

/// Resolve the journal database path from CLI args, config, or the XDG default.
pub fn resolve_journal_path(cli: &Cli, config: &JournalConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.journal.as_deref() {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.journal.path.as_deref() {
        return Ok(PathBuf::from(path));
    }
    default_journal_path()
}

/// Error returned when the database file does not exist.
pub fn missing_journal_error(path: &Path) -> CliError {
    CliError::not_found(
        format!("No journal found at {}", path.display()),
        "Hint: Run `journal init`, or point at a journal with --journal / JOURNAL_PATH.",
    )
}

/// Error returned when the database has no registered owner.
pub fn unregistered_error(path: &Path) -> CliError {
    CliError::not_found(
        format!("No user is registered in {}", path.display()),
        "Hint: Run `journal init` to register.",
    )
}
