use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::{entries_json, print_entry_list};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let entries = ctx.with_unlocked(|gate| Ok(gate.entries()?.list()?))?;

    if args.json {
        let output = serde_json::to_string_pretty(&entries_json(&entries))?;
        println!("{}", output);
    } else {
        let military = args.military || ctx.config()?.ui.military_time;
        print_entry_list(&entries, military, ctx.quiet());
    }
    Ok(())
}
