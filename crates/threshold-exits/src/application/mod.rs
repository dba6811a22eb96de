//! Application layer for the Exits context.

pub mod command_handlers;
mod notices;
pub mod query_handlers;
