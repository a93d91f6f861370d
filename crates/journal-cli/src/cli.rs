use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use journal_core::VERSION;

/// Journal - A PIN-protected personal journal
#[derive(Parser)]
#[command(name = "journal")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the journal database
    #[arg(short, long, global = true, env = "JOURNAL_PATH")]
    pub journal: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the journal database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Your name (asked interactively when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Entry title
    #[arg(long)]
    pub title: Option<String>,

    /// Entry content (read from stdin when omitted)
    #[arg(long)]
    pub content: Option<String>,

    /// Set custom date/time (ISO-8601, or YYYY-MM-DD in local time)
    #[arg(long)]
    pub date: Option<String>,

    /// Set the local time of day (HH:MM)
    #[arg(long)]
    pub time: Option<String>,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New content
    #[arg(long)]
    pub content: Option<String>,

    /// New date (ISO-8601, or YYYY-MM-DD keeping the time of day)
    #[arg(long)]
    pub date: Option<String>,

    /// New local time of day (HH:MM), keeping the date
    #[arg(long)]
    pub time: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args, Default)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show times on a 24-hour clock
    #[arg(long)]
    pub military: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a journal and register its owner
    Init(InitArgs),

    /// Add a new entry
    Add(AddArgs),

    /// List entries
    List(ListArgs),

    /// Show a specific entry by ID
    Show(ShowArgs),

    /// Change an entry's title, content or date
    Edit(EditArgs),

    /// Delete an entry
    Delete(DeleteArgs),

    /// Change the journal PIN
    ChangePin,

    /// Check database integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
