//! Domain events for the Exits context.

use serde::{Deserialize, Serialize};
use threshold_core::event::{DomainEvent, EventMetadata};
use uuid::Uuid;

use super::door::{DoorLeaf, DoorSide};

/// Event type identifier for [`DoorwayBuilt`].
pub const DOORWAY_BUILT_EVENT_TYPE: &str = "exits.doorway_built";

/// Event type identifier for [`DoorOpened`].
pub const DOOR_OPENED_EVENT_TYPE: &str = "exits.door_opened";

/// Event type identifier for [`DoorClosed`].
pub const DOOR_CLOSED_EVENT_TYPE: &str = "exits.door_closed";

/// Event type identifier for [`DoorLocked`].
pub const DOOR_LOCKED_EVENT_TYPE: &str = "exits.door_locked";

/// Event type identifier for [`DoorUnlocked`].
pub const DOOR_UNLOCKED_EVENT_TYPE: &str = "exits.door_unlocked";

/// Emitted when two leaves are joined into a doorway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorwayBuilt {
    /// The doorway identifier.
    pub doorway_id: Uuid,
    /// The front leaf.
    pub front: DoorLeaf,
    /// The back leaf.
    pub back: DoorLeaf,
}

/// Emitted when an actor opens one leaf (and with it, the pair).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorOpened {
    /// The doorway identifier.
    pub doorway_id: Uuid,
    /// The leaf the actor used.
    pub side: DoorSide,
    /// The acting actor.
    pub actor_id: Uuid,
}

/// Emitted when an actor closes one leaf (and with it, the pair).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorClosed {
    /// The doorway identifier.
    pub doorway_id: Uuid,
    /// The leaf the actor used.
    pub side: DoorSide,
    /// The acting actor.
    pub actor_id: Uuid,
}

/// Emitted when a closed doorway is locked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorLocked {
    /// The doorway identifier.
    pub doorway_id: Uuid,
}

/// Emitted when a locked doorway is unlocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorUnlocked {
    /// The doorway identifier.
    pub doorway_id: Uuid,
}

/// Event payload variants for the Exits context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExitEventKind {
    /// A doorway has been built.
    DoorwayBuilt(DoorwayBuilt),
    /// The doorway has been opened.
    DoorOpened(DoorOpened),
    /// The doorway has been closed.
    DoorClosed(DoorClosed),
    /// The doorway has been locked.
    DoorLocked(DoorLocked),
    /// The doorway has been unlocked.
    DoorUnlocked(DoorUnlocked),
}

impl ExitEventKind {
    /// Returns the event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DoorwayBuilt(_) => DOORWAY_BUILT_EVENT_TYPE,
            Self::DoorOpened(_) => DOOR_OPENED_EVENT_TYPE,
            Self::DoorClosed(_) => DOOR_CLOSED_EVENT_TYPE,
            Self::DoorLocked(_) => DOOR_LOCKED_EVENT_TYPE,
            Self::DoorUnlocked(_) => DOOR_UNLOCKED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Exits context.
#[derive(Debug, Clone)]
pub struct ExitEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ExitEventKind,
}

impl DomainEvent for ExitEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("ExitEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
