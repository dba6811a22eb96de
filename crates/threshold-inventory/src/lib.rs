//! Threshold — Inventory & Equipment bounded context.
//!
//! Owns what an actor's two hands hold and what each fixed equipment slot
//! wears, and enforces that an item occupies at most one of them.

pub mod application;
pub mod domain;
