//! Domain repositories over the record store.
//!
//! Each repository borrows the store and owns the row layout of one table.

mod entries;
mod users;

pub use entries::EntryRepository;
pub use users::UserRepository;
