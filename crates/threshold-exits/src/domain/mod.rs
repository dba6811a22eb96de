//! Domain layer for the Exits context.

pub mod aggregates;
pub mod commands;
pub mod door;
pub mod events;
pub mod rejections;
