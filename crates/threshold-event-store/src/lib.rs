//! Threshold — event store implementations.
//!
//! Both stores append with optimistic concurrency: an append whose
//! `expected_version` differs from the stream's current length is refused
//! with `DomainError::ConcurrencyConflict` and writes nothing.

pub mod memory_event_repository;
pub mod pg_event_repository;
pub mod schema;
