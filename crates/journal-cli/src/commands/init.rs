use std::path::PathBuf;

use journal_core::{Gate, GateState, JournalError, Registration, SqliteStore};

use crate::app::{load_config, resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::write_config;
use crate::constants::PIN_ENV;
use crate::errors::CliError;
use crate::helpers::{confirm, env_value, prompt_name, prompt_new_pin};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let path = match args.path.as_deref() {
        Some(value) => PathBuf::from(value),
        None => ctx.journal_path()?,
    };
    let interactive = ctx.interactive() && !args.no_input;

    let store = SqliteStore::open(&path)?;
    {
        let gate = ctx.gate(&store)?;
        if gate.state() != GateState::Unregistered {
            return Err(CliError::invalid_input(format!(
                "Journal at {} already has a registered user",
                path.display()
            ))
            .into());
        }
        register_owner(gate, args, interactive)?;
    }
    store.close()?;

    let config_path = resolve_config_path()?;
    let mut config = load_config()?;
    config.journal.path = Some(path.to_string_lossy().to_string());
    write_config(&config_path, &config)?;

    if !ctx.quiet() {
        println!("Initialized journal at {}", path.display());
        println!("Config written to {}", config_path.display());
    }
    Ok(())
}

/// Run registration until it succeeds.
///
/// Bad input is re-prompted only when both the name and the PIN come from
/// prompts; declining to try again abandons registration.
fn register_owner(
    mut gate: Gate<'_, SqliteStore>,
    args: &InitArgs,
    interactive: bool,
) -> anyhow::Result<()> {
    let retry = interactive && args.name.is_none() && env_value(PIN_ENV).is_none();

    loop {
        let name = match args.name.clone() {
            Some(name) => name,
            None if interactive => prompt_name()?,
            None => {
                return Err(CliError::invalid_input(
                    "No name provided and no TTY available. Pass --name.",
                )
                .into())
            }
        };
        let (pin, confirm_pin) = prompt_new_pin(PIN_ENV, interactive)?;

        match gate.register(&Registration::new(name, pin, confirm_pin)) {
            Ok(()) => return Ok(()),
            Err(JournalError::Validation(err)) if retry => {
                eprintln!("{}", err);
                if !confirm("Try again?", true)? {
                    return Err(gate.abandon_registration().into());
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}
