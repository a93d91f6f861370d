//! PIN entry with retry logic.

use journal_core::{Gate, GateState, RecordStore};

use crate::errors::CliError;
use crate::helpers::{env_pin, prompt_pin};

use super::context::AppContext;
use super::resolver::unregistered_error;

/// Bring `gate` to `Authenticated`.
///
/// A PIN from `JOURNAL_PIN` gets a single try. Interactive prompts repeat
/// until the configured attempt limit is reached (0 means no limit).
pub fn unlock_gate<S: RecordStore + ?Sized>(
    gate: &mut Gate<'_, S>,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match gate.state() {
        GateState::Authenticated => return Ok(()),
        GateState::Unregistered => return Err(unregistered_error(&ctx.journal_path()?).into()),
        GateState::AwaitingPin => {}
    }

    if let Some(pin) = env_pin() {
        if gate.unlock(&pin)? {
            return Ok(());
        }
        return Err(CliError::auth_failed_with_hint(
            "Incorrect PIN.",
            "Hint: Check the value of JOURNAL_PIN.",
        )
        .into());
    }

    if !ctx.interactive() {
        return Err(CliError::auth_failed_with_hint(
            "No PIN provided and no TTY available.",
            "Hint: Set JOURNAL_PIN.",
        )
        .into());
    }

    let max_attempts = ctx.config()?.security.max_pin_attempts;
    loop {
        let pin = prompt_pin()?;
        if gate.unlock(&pin)? {
            return Ok(());
        }

        let attempts = gate.failed_attempts();
        if max_attempts > 0 && attempts >= max_attempts {
            return Err(CliError::auth_failed_with_hint(
                "Too many incorrect PIN attempts.",
                "Hint: The PIN can be changed with `journal change-pin` once unlocked.",
            )
            .into());
        }
        if max_attempts > 0 {
            let remaining = max_attempts - attempts;
            eprintln!(
                "Incorrect PIN. {} attempt{} remaining.",
                remaining,
                if remaining == 1 { "" } else { "s" }
            );
        } else {
            eprintln!("Incorrect PIN.");
        }
    }
}
