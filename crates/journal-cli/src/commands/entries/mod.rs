//! Entry commands: add, list, show, edit, delete.

mod add;
mod delete;
mod edit;
mod list;
mod show;

pub use add::handle_add;
pub use delete::handle_delete;
pub use edit::handle_edit;
pub use list::handle_list;
pub use show::handle_show;

use journal_core::{Entry, EntryRepository, RecordStore};
use uuid::Uuid;

use crate::errors::CliError;

/// Fetch an entry or fail with a not-found error.
fn require_entry<S: RecordStore + ?Sized>(
    entries: &EntryRepository<'_, S>,
    id: &Uuid,
) -> anyhow::Result<Entry> {
    entries.get(id)?.ok_or_else(|| {
        CliError::not_found(
            format!("Entry {} not found", id),
            "Hint: Run `journal list` to find entry IDs.",
        )
        .into()
    })
}
