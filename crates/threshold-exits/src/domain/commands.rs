//! Commands for the Exits context.

use threshold_core::command::Command;
use uuid::Uuid;

use super::door::{DoorLeaf, DoorSide};

/// Command to join two leaves into a doorway.
#[derive(Debug, Clone)]
pub struct BuildDoorway {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The doorway identifier.
    pub doorway_id: Uuid,
    /// The front leaf.
    pub front: DoorLeaf,
    /// The back leaf.
    pub back: DoorLeaf,
}

impl Command for BuildDoorway {
    fn command_type(&self) -> &'static str {
        "exits.build_doorway"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to open a door from one of its sides.
#[derive(Debug, Clone)]
pub struct OpenDoor {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The doorway identifier.
    pub doorway_id: Uuid,
    /// The side the actor is standing at.
    pub side: DoorSide,
    /// The acting actor.
    pub actor_id: Uuid,
}

impl Command for OpenDoor {
    fn command_type(&self) -> &'static str {
        "exits.open_door"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Option<Uuid> {
        Some(self.actor_id)
    }
}

/// Command to close a door from one of its sides.
#[derive(Debug, Clone)]
pub struct CloseDoor {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The doorway identifier.
    pub doorway_id: Uuid,
    /// The side the actor is standing at.
    pub side: DoorSide,
    /// The acting actor.
    pub actor_id: Uuid,
}

impl Command for CloseDoor {
    fn command_type(&self) -> &'static str {
        "exits.close_door"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Option<Uuid> {
        Some(self.actor_id)
    }
}

/// Command to lock a closed doorway.
#[derive(Debug, Clone)]
pub struct LockDoor {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The doorway identifier.
    pub doorway_id: Uuid,
}

impl Command for LockDoor {
    fn command_type(&self) -> &'static str {
        "exits.lock_door"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to unlock a locked doorway, leaving it closed.
#[derive(Debug, Clone)]
pub struct UnlockDoor {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The doorway identifier.
    pub doorway_id: Uuid,
}

impl Command for UnlockDoor {
    fn command_type(&self) -> &'static str {
        "exits.unlock_door"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to pass through a door to the location on its far side.
#[derive(Debug, Clone)]
pub struct TraverseDoor {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The doorway identifier.
    pub doorway_id: Uuid,
    /// The side the actor enters from.
    pub side: DoorSide,
    /// The acting actor.
    pub actor_id: Uuid,
}

impl Command for TraverseDoor {
    fn command_type(&self) -> &'static str {
        "exits.traverse_door"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Option<Uuid> {
        Some(self.actor_id)
    }
}
