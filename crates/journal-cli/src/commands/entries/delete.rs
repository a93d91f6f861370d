use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::helpers::{confirm, parse_entry_id};

use super::require_entry;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let id = parse_entry_id(&args.id)?;

    let deleted = ctx.with_unlocked(|gate| {
        let entries = gate.entries()?;
        let entry = require_entry(&entries, &id)?;

        if !args.yes {
            if !ctx.interactive() {
                return Err(CliError::invalid_input(
                    "Refusing to delete without confirmation; pass --yes.",
                )
                .into());
            }
            let prompt = format!("Delete \"{}\"?", entry.title);
            if !confirm(&prompt, false)? {
                return Ok(false);
            }
        }

        entries.delete(&id)?;
        Ok(true)
    })?;

    if !ctx.quiet() {
        if deleted {
            println!("Deleted entry {}", id);
        } else {
            println!("Kept entry {}", id);
        }
    }
    Ok(())
}
