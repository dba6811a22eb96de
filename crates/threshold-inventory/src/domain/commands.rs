//! Commands for the Inventory & Equipment context.

use threshold_core::command::Command;
use uuid::Uuid;

use super::slots::Hand;

/// Command to initialise an actor's hands and equipment slots.
#[derive(Debug, Clone)]
pub struct CreateInventory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor the inventory belongs to.
    pub actor_id: Uuid,
    /// The dominant hand; defaults to right.
    pub dominant_hand: Option<Hand>,
}

impl Command for CreateInventory {
    fn command_type(&self) -> &'static str {
        "inventory.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to pick an item up into a free hand.
#[derive(Debug, Clone)]
pub struct PickUpItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The acting actor.
    pub actor_id: Uuid,
    /// The catalogued item to pick up.
    pub item_id: Uuid,
}

impl Command for PickUpItem {
    fn command_type(&self) -> &'static str {
        "inventory.pick_up_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Option<Uuid> {
        Some(self.actor_id)
    }
}

/// Command to drop a held item.
#[derive(Debug, Clone)]
pub struct DropItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The acting actor.
    pub actor_id: Uuid,
    /// The item to drop.
    pub item_id: Uuid,
}

impl Command for DropItem {
    fn command_type(&self) -> &'static str {
        "inventory.drop_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Option<Uuid> {
        Some(self.actor_id)
    }
}

/// Command to wear a held item.
#[derive(Debug, Clone)]
pub struct WearItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The acting actor.
    pub actor_id: Uuid,
    /// The item to wear.
    pub item_id: Uuid,
}

impl Command for WearItem {
    fn command_type(&self) -> &'static str {
        "inventory.wear_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Option<Uuid> {
        Some(self.actor_id)
    }
}

/// Command to take off a worn item.
#[derive(Debug, Clone)]
pub struct RemoveItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The acting actor.
    pub actor_id: Uuid,
    /// The item to remove.
    pub item_id: Uuid,
}

impl Command for RemoveItem {
    fn command_type(&self) -> &'static str {
        "inventory.remove_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Option<Uuid> {
        Some(self.actor_id)
    }
}
