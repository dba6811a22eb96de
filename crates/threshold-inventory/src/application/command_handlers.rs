//! Command handlers for the Inventory & Equipment context.
//!
//! Each handler loads the actor's inventory, runs one guarded transition,
//! persists the resulting events with optimistic concurrency, and only then
//! announces the outcome. A refused transition is told to the acting actor
//! and nothing is persisted.

use threshold_core::aggregate::AggregateRoot;
use threshold_core::clock::Clock;
use threshold_core::command::Command;
use threshold_core::error::DomainError;
use threshold_core::ports::Notifier;
use threshold_core::repository::{EventRepository, StoredEvent};
use threshold_core::transition::{GuardedTransition, attempt, refuse};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::notices;
use crate::domain::aggregates::{Inventory, PickUp, PutDown, Remove, Wear};
use crate::domain::catalog::ItemCatalog;
use crate::domain::commands::{CreateInventory, DropItem, PickUpItem, RemoveItem, WearItem};
use crate::domain::events::{InventoryEvent, InventoryEventKind};
use crate::domain::rejections::PickUpRejection;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct InventoryCommandResult {
    /// The aggregate ID affected by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
}

/// Reconstitutes an `Inventory` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    actor_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<Inventory, DomainError> {
    let mut inventory = Inventory::new(actor_id);
    for stored in existing_events {
        let (metadata, kind) = stored.decode::<InventoryEventKind>()?;
        inventory.apply(&InventoryEvent { metadata, kind });
    }
    Ok(inventory)
}

/// Loads an existing inventory from the actor's inventory stream.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the actor has no inventory.
pub(crate) async fn load(
    actor_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<Inventory, DomainError> {
    let existing_events = repo.load_events(Inventory::stream_id(actor_id)).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(actor_id));
    }
    reconstitute(actor_id, &existing_events)
}

async fn persist(
    inventory: &Inventory,
    repo: &dyn EventRepository,
) -> Result<InventoryCommandResult, DomainError> {
    let stored_events: Vec<StoredEvent> = inventory
        .uncommitted_events()
        .iter()
        .map(|event| StoredEvent::from_domain_event(event))
        .collect();

    repo.append_events(inventory.id, inventory.version(), &stored_events)
        .await?;

    Ok(InventoryCommandResult {
        aggregate_id: inventory.id,
        stored_events,
    })
}

async fn run_transition<T>(
    command: &dyn Command,
    actor_id: Uuid,
    target: &T,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    notifier: &Notifier<'_>,
) -> Result<InventoryCommandResult, DomainError>
where
    T: Sync,
    Inventory: GuardedTransition<T, Context = ()>,
{
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        %actor_id,
        "handling inventory command"
    );

    let mut inventory = load(actor_id, repo).await?;

    if let Err(rejection) = attempt(&mut inventory, target, &(), command.correlation_id(), clock) {
        debug!(?rejection, %actor_id, "inventory transition refused");
        return Err(refuse(rejection, actor_id, notifier));
    }

    persist(&inventory, repo).await
}

/// Handles the `CreateInventory` command: initialises empty hands and slots
/// and persists the resulting event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the inventory already exists, or
/// `DomainError` if event loading or appending fails.
pub async fn handle_create_inventory(
    command: &CreateInventory,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<InventoryCommandResult, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        actor_id = %command.actor_id,
        "handling inventory command"
    );

    let existing_events = repo
        .load_events(Inventory::stream_id(command.actor_id))
        .await?;
    let mut inventory = reconstitute(command.actor_id, &existing_events)?;

    inventory.create(
        command.dominant_hand.unwrap_or_default(),
        command.correlation_id,
        clock,
    )?;

    persist(&inventory, repo).await
}

/// Handles the `PickUpItem` command.
///
/// The item is resolved through the catalog and must be lying where the
/// actor stands. Once the transition is accepted the item is moved onto the
/// actor before the events are persisted, so two actors racing for the same
/// item cannot both take it.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if the item is not here, is already
/// carried, or both hands are full, or `DomainError` if event loading or
/// appending fails.
pub async fn handle_pick_up_item(
    command: &PickUpItem,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    catalog: &dyn ItemCatalog,
    notifier: &Notifier<'_>,
) -> Result<InventoryCommandResult, DomainError> {
    let actor_id = command.actor_id;
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        %actor_id,
        item_id = %command.item_id,
        "handling inventory command"
    );

    let mut inventory = load(actor_id, repo).await?;

    let Some((item, whereabouts)) = catalog.lookup(command.item_id) else {
        debug!(item_id = %command.item_id, "item is not catalogued");
        return Err(refuse(PickUpRejection::NotHere, actor_id, notifier));
    };
    let from = match whereabouts {
        Some(at) if at == actor_id || Some(at) == notifier.location_of(actor_id) => at,
        _ => return Err(refuse(PickUpRejection::NotHere, actor_id, notifier)),
    };

    if let Err(rejection) = attempt(
        &mut inventory,
        &PickUp(item),
        &(),
        command.correlation_id,
        clock,
    ) {
        debug!(?rejection, %actor_id, "inventory transition refused");
        return Err(refuse(rejection, actor_id, notifier));
    }

    if !catalog.relocate(item.id, from, Some(actor_id)) {
        debug!(item_id = %item.id, "item moved before it could be taken");
        return Err(refuse(PickUpRejection::NotHere, actor_id, notifier));
    }

    let result = match persist(&inventory, repo).await {
        Ok(result) => result,
        Err(error) => {
            catalog.relocate(item.id, actor_id, Some(from));
            return Err(error);
        }
    };

    notices::item_picked_up(notifier, actor_id, item.id);
    Ok(result)
}

/// Handles the `DropItem` command. The dropped item is put back in the
/// actor's location.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if the item is worn or not held, or
/// `DomainError` if event loading or appending fails.
pub async fn handle_drop_item(
    command: &DropItem,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    catalog: &dyn ItemCatalog,
    notifier: &Notifier<'_>,
) -> Result<InventoryCommandResult, DomainError> {
    let target = PutDown(command.item_id);
    let result =
        run_transition(command, command.actor_id, &target, clock, repo, notifier).await?;

    let room = notifier.location_of(command.actor_id);
    if !catalog.relocate(command.item_id, command.actor_id, room) {
        warn!(item_id = %command.item_id, "dropped item was not catalogued on its carrier");
    }

    notices::item_dropped(notifier, command.actor_id, command.item_id);
    Ok(result)
}

/// Handles the `WearItem` command.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if the item is not held, not wearable,
/// already worn, or its slot is taken, or `DomainError` if event loading or
/// appending fails.
pub async fn handle_wear_item(
    command: &WearItem,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    notifier: &Notifier<'_>,
) -> Result<InventoryCommandResult, DomainError> {
    let target = Wear(command.item_id);
    let result =
        run_transition(command, command.actor_id, &target, clock, repo, notifier).await?;
    notices::item_worn(notifier, command.actor_id, command.item_id);
    Ok(result)
}

/// Handles the `RemoveItem` command.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if the item is not worn or no hand is
/// free, or `DomainError` if event loading or appending fails.
pub async fn handle_remove_item(
    command: &RemoveItem,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    notifier: &Notifier<'_>,
) -> Result<InventoryCommandResult, DomainError> {
    let target = Remove(command.item_id);
    let result =
        run_transition(command, command.actor_id, &target, clock, repo, notifier).await?;
    notices::item_removed(notifier, command.actor_id, command.item_id);
    Ok(result)
}
