//! Shared test mocks and utilities for the Threshold world engine.

mod clock;
mod messenger;
mod repository;
mod world;

pub use clock::FixedClock;
pub use messenger::RecordingMessenger;
pub use repository::{EmptyEventRepository, FailingEventRepository, RecordingEventRepository};
pub use world::StaticWorld;
