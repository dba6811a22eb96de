//! Application layer for the Inventory & Equipment context.

pub mod command_handlers;
mod notices;
pub mod query_handlers;
