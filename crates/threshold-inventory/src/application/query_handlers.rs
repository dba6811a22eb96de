//! Query handlers for the Inventory & Equipment context.
//!
//! These reconstitute an inventory from its stored events and return
//! read-only views. None of them emits events or messages.

use serde::Serialize;
use threshold_core::aggregate::AggregateRoot;
use threshold_core::error::DomainError;
use threshold_core::ports::NameResolver;
use threshold_core::repository::EventRepository;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::slots::{EquipmentSlot, Hand, Item};

/// What one hand is holding.
#[derive(Debug, Serialize)]
pub struct HandView {
    /// The hand.
    pub hand: Hand,
    /// The held item, if any.
    pub item: Option<Item>,
}

/// What one equipment slot is holding.
#[derive(Debug, Serialize)]
pub struct SlotView {
    /// The slot.
    pub slot: EquipmentSlot,
    /// The worn item, if any.
    pub item: Option<Item>,
}

/// Read-only view of an inventory aggregate.
#[derive(Debug, Serialize)]
pub struct InventoryView {
    /// The owning actor.
    pub actor_id: Uuid,
    /// The hand tried first when taking an item.
    pub dominant_hand: Hand,
    /// The hand the next item would go into, if any.
    pub free_hand: Option<Hand>,
    /// Both hands in registry order.
    pub hands: Vec<HandView>,
    /// Every equipment slot in registry order.
    pub equipment: Vec<SlotView>,
    /// Current version (event count).
    pub version: i64,
}

/// Retrieves an inventory by its actor ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_inventory_by_id(
    actor_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<InventoryView, DomainError> {
    let inventory = command_handlers::load(actor_id, repo).await?;
    Ok(InventoryView {
        actor_id,
        dominant_hand: inventory.dominant_hand(),
        free_hand: inventory.free_hand(),
        hands: Hand::ALL
            .iter()
            .map(|hand| HandView {
                hand: *hand,
                item: inventory.held(*hand),
            })
            .collect(),
        equipment: EquipmentSlot::ALL
            .iter()
            .map(|slot| SlotView {
                slot: *slot,
                item: inventory.worn(*slot),
            })
            .collect(),
        version: inventory.version(),
    })
}

/// Lists the actor's equipment slots, one `"<Slot>: <item>"` line each,
/// as seen by `viewer`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the actor has no inventory.
pub async fn describe_equipment(
    actor_id: Uuid,
    viewer: Uuid,
    names: &dyn NameResolver,
    repo: &dyn EventRepository,
) -> Result<String, DomainError> {
    let inventory = command_handlers::load(actor_id, repo).await?;
    Ok(inventory.describe_equipment(names, viewer))
}

/// Describes what the actor is holding, as seen by `viewer`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the actor has no inventory.
pub async fn describe_inventory(
    actor_id: Uuid,
    viewer: Uuid,
    names: &dyn NameResolver,
    repo: &dyn EventRepository,
) -> Result<String, DomainError> {
    let inventory = command_handlers::load(actor_id, repo).await?;
    Ok(inventory.describe_inventory(names, viewer))
}
