//! Command handlers, one module per command group.

pub mod account;
pub mod entries;
pub mod init;
pub mod maintenance;
pub mod misc;
