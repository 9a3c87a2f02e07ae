//! Application layer: runs reducer effects and serves commands and queries.

pub mod command_handlers;
pub mod query_handlers;
pub mod registry;
pub mod session_handle;
