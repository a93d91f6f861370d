use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::helpers::parse_entry_id;
use crate::output::{entry_json, print_entry};

use super::require_entry;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let id = parse_entry_id(&args.id)?;
    let entry = ctx.with_unlocked(|gate| require_entry(&gate.entries()?, &id))?;

    if args.json {
        let output = serde_json::to_string_pretty(&entry_json(&entry))?;
        println!("{}", output);
    } else {
        print_entry(&entry, ctx.config()?.ui.military_time, ctx.quiet());
    }
    Ok(())
}
