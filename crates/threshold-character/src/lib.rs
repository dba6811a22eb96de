//! Threshold — Character bounded context.
//!
//! Owns an actor's name and posture. Posture changes run through the guarded
//! transition protocol, and movement elsewhere in the world is gated on the
//! actor standing.

pub mod application;
pub mod domain;
