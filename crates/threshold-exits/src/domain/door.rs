//! Door leaves, sides and the shared door state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The state shared by both leaves of a doorway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorState {
    /// Passable.
    Open,
    /// Shut but not locked.
    #[default]
    Closed,
    /// Shut and locked.
    Locked,
}

/// One of the two sides of a doorway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorSide {
    /// The leaf created first.
    Front,
    /// The leaf on the far side of the front leaf.
    Back,
}

impl DoorSide {
    /// Both sides, in storage order.
    pub const ALL: [DoorSide; 2] = [DoorSide::Front, DoorSide::Back];

    /// The paired side. Applying it twice returns the original side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// One leaf of a doorway as seen from the location it stands in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorLeaf {
    /// The exit entity players interact with.
    pub exit_id: Uuid,
    /// The location this leaf stands in.
    pub location_id: Uuid,
    /// Message shown when traversal is refused by access control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traverse_error: Option<String>,
}

impl DoorLeaf {
    /// Creates a leaf with the generic traversal-denied message.
    #[must_use]
    pub fn new(exit_id: Uuid, location_id: Uuid) -> Self {
        Self {
            exit_id,
            location_id,
            traverse_error: None,
        }
    }

    /// Sets a custom traversal-denied message.
    #[must_use]
    pub fn with_traverse_error(mut self, message: impl Into<String>) -> Self {
        self.traverse_error = Some(message.into());
        self
    }
}
