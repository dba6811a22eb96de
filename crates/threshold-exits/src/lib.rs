//! Threshold — Exits bounded context.
//!
//! A doorway joins two locations through a pair of door leaves that always
//! share one state (open, closed or locked). Opening or closing either leaf
//! changes both at once and is announced on both sides.

pub mod application;
pub mod domain;
