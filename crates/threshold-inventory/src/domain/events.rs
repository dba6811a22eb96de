//! Domain events for the Inventory & Equipment context.

use serde::{Deserialize, Serialize};
use threshold_core::event::{DomainEvent, EventMetadata};
use uuid::Uuid;

use super::slots::{EquipmentSlot, Hand, Item};

/// Event type identifier for [`InventoryCreated`].
pub const INVENTORY_CREATED_EVENT_TYPE: &str = "inventory.created";

/// Event type identifier for [`ItemPickedUp`].
pub const ITEM_PICKED_UP_EVENT_TYPE: &str = "inventory.item_picked_up";

/// Event type identifier for [`ItemDropped`].
pub const ITEM_DROPPED_EVENT_TYPE: &str = "inventory.item_dropped";

/// Event type identifier for [`ItemWorn`].
pub const ITEM_WORN_EVENT_TYPE: &str = "inventory.item_worn";

/// Event type identifier for [`ItemRemoved`].
pub const ITEM_REMOVED_EVENT_TYPE: &str = "inventory.item_removed";

/// Emitted when an actor's hands and slots are initialised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryCreated {
    /// The actor owning the inventory.
    pub actor_id: Uuid,
    /// The actor's dominant hand.
    pub dominant_hand: Hand,
}

/// Emitted when an item is taken into a hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPickedUp {
    /// The actor owning the inventory.
    pub actor_id: Uuid,
    /// The item picked up.
    pub item: Item,
    /// The hand now holding it.
    pub hand: Hand,
}

/// Emitted when a held item is let go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDropped {
    /// The actor owning the inventory.
    pub actor_id: Uuid,
    /// The item dropped.
    pub item_id: Uuid,
    /// The hand that held it.
    pub hand: Hand,
}

/// Emitted when a held item moves onto its equipment slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemWorn {
    /// The actor owning the inventory.
    pub actor_id: Uuid,
    /// The item worn.
    pub item_id: Uuid,
    /// The hand it left.
    pub hand: Hand,
    /// The slot it now occupies.
    pub slot: EquipmentSlot,
}

/// Emitted when a worn item moves back into a hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRemoved {
    /// The actor owning the inventory.
    pub actor_id: Uuid,
    /// The item removed.
    pub item_id: Uuid,
    /// The slot it left.
    pub slot: EquipmentSlot,
    /// The hand now holding it.
    pub hand: Hand,
}

/// Event payload variants for the Inventory & Equipment context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InventoryEventKind {
    /// The inventory has been initialised.
    InventoryCreated(InventoryCreated),
    /// An item has been picked up.
    ItemPickedUp(ItemPickedUp),
    /// An item has been dropped.
    ItemDropped(ItemDropped),
    /// An item has been worn.
    ItemWorn(ItemWorn),
    /// A worn item has been removed.
    ItemRemoved(ItemRemoved),
}

impl InventoryEventKind {
    /// Returns the event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::InventoryCreated(_) => INVENTORY_CREATED_EVENT_TYPE,
            Self::ItemPickedUp(_) => ITEM_PICKED_UP_EVENT_TYPE,
            Self::ItemDropped(_) => ITEM_DROPPED_EVENT_TYPE,
            Self::ItemWorn(_) => ITEM_WORN_EVENT_TYPE,
            Self::ItemRemoved(_) => ITEM_REMOVED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Inventory & Equipment context.
#[derive(Debug, Clone)]
pub struct InventoryEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: InventoryEventKind,
}

impl DomainEvent for InventoryEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("InventoryEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
