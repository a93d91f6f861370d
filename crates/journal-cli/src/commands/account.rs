use journal_core::JournalError;

use crate::app::AppContext;
use crate::constants::NEW_PIN_ENV;
use crate::helpers::{env_value, prompt_new_pin};

pub fn handle_change_pin(ctx: &AppContext) -> anyhow::Result<()> {
    let interactive = ctx.interactive();
    let retry = interactive && env_value(NEW_PIN_ENV).is_none();

    ctx.with_unlocked(|gate| loop {
        let (pin, confirm) = prompt_new_pin(NEW_PIN_ENV, interactive)?;
        match gate.change_pin(&pin, &confirm) {
            Ok(()) => return Ok(()),
            Err(JournalError::Validation(err)) if retry => eprintln!("{}", err),
            Err(err) => return Err(err.into()),
        }
    })?;

    if !ctx.quiet() {
        println!("PIN changed");
    }
    Ok(())
}
