//! Application context for the Journal CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! the lazily-loaded configuration file.

use std::io::IsTerminal;
use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use tracing::debug;

use journal_core::{Gate, SqliteStore};

use crate::cli::Cli;
use crate::config::JournalConfig;

use super::resolver::{load_config, missing_journal_error, resolve_journal_path};
use super::unlock::unlock_gate;

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<JournalConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether prompts can be shown.
    pub fn interactive(&self) -> bool {
        std::io::stdin().is_terminal()
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&JournalConfig> {
        self.config.get_or_try_init(load_config)
    }

    /// Path of the journal database this invocation targets.
    pub fn journal_path(&self) -> anyhow::Result<PathBuf> {
        resolve_journal_path(self.cli, self.config()?)
    }

    /// Open the existing journal database.
    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.journal_path()?;
        if !path.exists() {
            return Err(missing_journal_error(&path).into());
        }
        debug!(path = %path.display(), "opening journal");
        Ok(SqliteStore::open(&path)?)
    }

    /// A gate configured from the `[security]` section.
    pub fn gate<'s>(&self, store: &'s SqliteStore) -> anyhow::Result<Gate<'s, SqliteStore>> {
        let security = &self.config()?.security;
        Ok(Gate::with_options(
            store,
            security.username.as_str(),
            security.pin_storage,
        )?)
    }

    /// Open the journal, unlock it, and run `f` against the unlocked gate.
    ///
    /// The store is closed after `f` returns successfully.
    pub fn with_unlocked<T>(
        &self,
        f: impl FnOnce(&Gate<'_, SqliteStore>) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let store = self.open_store()?;
        let result = {
            let mut gate = self.gate(&store)?;
            unlock_gate(&mut gate, self)?;
            f(&gate)?
        };
        store.close()?;
        Ok(result)
    }
}
