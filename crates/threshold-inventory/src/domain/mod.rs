//! Domain layer for the Inventory & Equipment context.

pub mod aggregates;
pub mod catalog;
pub mod commands;
pub mod events;
pub mod rejections;
pub mod slots;
