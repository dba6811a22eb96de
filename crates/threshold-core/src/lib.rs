//! Threshold Core — shared domain abstractions.
//!
//! This crate defines the traits and types every bounded context depends on:
//! event-sourced aggregates, the guarded transition protocol, and the ports
//! through which the presentation layer is reached. It contains no
//! infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod ports;
pub mod repository;
pub mod text;
pub mod transition;
