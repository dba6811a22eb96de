//! Threshold — HTTP adapter.
//!
//! Exposes the character, inventory and exits contexts over JSON, and keeps
//! the in-memory world directory (names, locations, access rules) that the
//! state machines announce through.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod world;
