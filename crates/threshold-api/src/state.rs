//! Shared application state.

use std::fmt;
use std::sync::Arc;

use threshold_core::clock::Clock;
use threshold_core::ports::Notifier;
use threshold_core::repository::EventRepository;

use crate::world::{Mailbox, WorldDirectory};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of event timestamps.
    pub clock: Arc<dyn Clock>,
    /// Event store shared by every bounded context.
    pub event_repository: Arc<dyn EventRepository>,
    /// Names, locations and access rules.
    pub world: Arc<WorldDirectory>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("world", &self.world)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        event_repository: Arc<dyn EventRepository>,
        world: Arc<WorldDirectory>,
    ) -> Self {
        Self {
            clock,
            event_repository,
            world,
        }
    }

    /// A notifier that delivers into `mailbox` and resolves names and
    /// locations from the world directory.
    #[must_use]
    pub fn notifier<'a>(&'a self, mailbox: &'a Mailbox) -> Notifier<'a> {
        Notifier::new(mailbox, &*self.world, &*self.world)
    }
}
