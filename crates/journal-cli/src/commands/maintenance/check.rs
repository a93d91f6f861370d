use crate::app::{unlock_gate, AppContext};
use crate::errors::CliError;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    {
        let mut gate = ctx.gate(&store)?;
        unlock_gate(&mut gate, ctx)?;
    }

    match store.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                println!("Integrity check: OK");
                for (table, rows) in store.counts()? {
                    let plural = if rows == 1 { "" } else { "s" };
                    println!("- {}: {} row{}", table, rows, plural);
                }
            }
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            eprintln!("Hint: Restore the database file from a copy before making changes.");
            return Err(CliError::IntegrityFailed(err.to_string()).into());
        }
    }

    store.close()?;
    Ok(())
}
