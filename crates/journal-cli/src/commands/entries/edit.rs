use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::helpers::{apply_date_time, parse_date, parse_entry_id, parse_time, read_content};

use super::require_entry;

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let id = parse_entry_id(&args.id)?;
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let time = args.time.as_deref().map(parse_time).transpose()?;

    ctx.with_unlocked(|gate| {
        let entries = gate.entries()?;
        let mut entry = require_entry(&entries, &id)?;

        if let Some(title) = args.title.as_ref() {
            entry.title = title.clone();
        }
        if date.is_some() || time.is_some() {
            let moved = apply_date_time(entry.date, date, time)?;
            entry.set_date(moved);
        }
        // With no field flags at all, the content is edited interactively.
        let nothing_given = args.title.is_none() && date.is_none() && time.is_none();
        if args.content.is_some() || nothing_given {
            entry.content = read_content(args.content.clone(), &entry.content)?;
        }

        entries.update(&id, &entry)?;
        Ok(())
    })?;

    if !ctx.quiet() {
        println!("Edited entry {}", id);
    }
    Ok(())
}
