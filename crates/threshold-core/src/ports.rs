//! Ports to the presentation layer.
//!
//! The state machines never format output for a socket or a terminal
//! themselves. They reach actors through these traits, which the hosting
//! layer implements (the HTTP adapter, or the doubles in the test-support
//! crate).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Capabilities checked through [`AccessControl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Pass through an exit.
    Traverse,
}

/// Delivers text to a single actor.
pub trait Messenger: Send + Sync {
    /// Sends `text` to `recipient`.
    fn send(&self, recipient: Uuid, text: &str);
}

/// Resolves the name an entity is shown as to a particular viewer.
pub trait NameResolver: Send + Sync {
    /// Returns the display name of `entity` as seen by `viewer`.
    fn display_name(&self, entity: Uuid, viewer: Uuid) -> String;
}

/// Answers access questions.
pub trait AccessControl: Send + Sync {
    /// Returns whether `actor` holds `capability` on `entity`.
    fn has_permission(&self, actor: Uuid, entity: Uuid, capability: Capability) -> bool;
}

/// Location and contents queries.
pub trait Locator: Send + Sync {
    /// Returns the location `entity` is currently in, if any.
    fn location_of(&self, entity: Uuid) -> Option<Uuid>;

    /// Returns every occupant of `location`.
    fn occupants(&self, location: Uuid) -> Vec<Uuid>;
}

/// Bundles the ports needed to announce a transition.
#[derive(Clone, Copy)]
pub struct Notifier<'a> {
    messenger: &'a dyn Messenger,
    names: &'a dyn NameResolver,
    locator: &'a dyn Locator,
}

impl std::fmt::Debug for Notifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

impl<'a> Notifier<'a> {
    /// Creates a notifier over the given ports.
    #[must_use]
    pub fn new(
        messenger: &'a dyn Messenger,
        names: &'a dyn NameResolver,
        locator: &'a dyn Locator,
    ) -> Self {
        Self {
            messenger,
            names,
            locator,
        }
    }

    /// Sends `text` to a single actor.
    pub fn tell(&self, recipient: Uuid, text: &str) {
        self.messenger.send(recipient, text);
    }

    /// Returns the display name of `entity` for `viewer`.
    #[must_use]
    pub fn name(&self, entity: Uuid, viewer: Uuid) -> String {
        self.names.display_name(entity, viewer)
    }

    /// Returns the location `entity` is in, if any.
    #[must_use]
    pub fn location_of(&self, entity: Uuid) -> Option<Uuid> {
        self.locator.location_of(entity)
    }

    /// Sends a message to every occupant of `location` except those in
    /// `exclude`. The text is rendered once per recipient so that names can
    /// be resolved from that recipient's point of view. Returns the number
    /// of recipients reached.
    pub fn broadcast<F>(&self, location: Uuid, exclude: &[Uuid], render: F) -> usize
    where
        F: Fn(Uuid) -> String,
    {
        let mut reached = 0;
        for occupant in self.locator.occupants(location) {
            if exclude.contains(&occupant) {
                continue;
            }
            self.messenger.send(occupant, &render(occupant));
            reached += 1;
        }
        reached
    }
}
