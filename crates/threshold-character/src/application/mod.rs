//! Application layer for the Character context.

pub mod command_handlers;
mod notices;
pub mod query_handlers;
