use chrono::Utc;
use journal_core::Entry;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::{apply_date_time, parse_date, parse_time, read_content};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let time = args.time.as_deref().map(parse_time).transpose()?;
    let date = apply_date_time(Utc::now(), date, time)?;

    let entry_id = ctx.with_unlocked(|gate| {
        let content = read_content(args.content.clone(), "")?;
        let entry = Entry::new()
            .with_title(args.title.clone().unwrap_or_default())
            .with_content(content)
            .with_date(date);
        gate.entries()?.add(&entry)?;
        Ok(entry.id)
    })?;

    if !ctx.quiet() {
        println!("Added entry {}", entry_id);
    }
    Ok(())
}
