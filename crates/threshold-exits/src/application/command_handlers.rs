//! Command handlers for the Exits context.
//!
//! Opening and closing go through the door pair state machine and are
//! announced on both sides once persisted. Locking and unlocking are
//! silent builder operations. Traversal records nothing; it only decides
//! where the actor ends up.

use threshold_core::aggregate::AggregateRoot;
use threshold_core::clock::Clock;
use threshold_core::command::Command;
use threshold_core::error::DomainError;
use threshold_core::ports::{AccessControl, Capability, Notifier};
use threshold_core::repository::{EventRepository, StoredEvent};
use threshold_core::transition::{attempt, refuse};
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::notices;
use crate::domain::aggregates::{DoorAction, DoorUse, Doorway};
use crate::domain::commands::{
    BuildDoorway, CloseDoor, LockDoor, OpenDoor, TraverseDoor, UnlockDoor,
};
use crate::domain::door::DoorSide;
use crate::domain::events::{ExitEvent, ExitEventKind};

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct ExitCommandResult {
    /// The aggregate ID affected by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
}

/// Where a successful traversal leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traversal {
    /// The location on the far side of the door.
    pub destination: Uuid,
}

/// Reconstitutes a `Doorway` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    doorway_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<Doorway, DomainError> {
    let mut doorway = Doorway::new(doorway_id);
    for stored in existing_events {
        let (metadata, kind) = stored.decode::<ExitEventKind>()?;
        doorway.apply(&ExitEvent { metadata, kind });
    }
    Ok(doorway)
}

/// Loads an existing doorway.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
pub(crate) async fn load(
    doorway_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<Doorway, DomainError> {
    let existing_events = repo.load_events(doorway_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(doorway_id));
    }
    reconstitute(doorway_id, &existing_events)
}

async fn persist(
    doorway: &Doorway,
    repo: &dyn EventRepository,
) -> Result<ExitCommandResult, DomainError> {
    let stored_events: Vec<StoredEvent> = doorway
        .uncommitted_events()
        .iter()
        .map(|event| StoredEvent::from_domain_event(event))
        .collect();

    repo.append_events(doorway.id, doorway.version(), &stored_events)
        .await?;

    Ok(ExitCommandResult {
        aggregate_id: doorway.id,
        stored_events,
    })
}

/// Handles the `BuildDoorway` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the doorway exists or the leaves are
/// not distinct, or `DomainError` if event loading or appending fails.
pub async fn handle_build_doorway(
    command: &BuildDoorway,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ExitCommandResult, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        doorway_id = %command.doorway_id,
        "handling exits command"
    );

    let existing_events = repo.load_events(command.doorway_id).await?;
    let mut doorway = reconstitute(command.doorway_id, &existing_events)?;

    doorway.build(
        command.front.clone(),
        command.back.clone(),
        command.correlation_id,
        clock,
    )?;

    persist(&doorway, repo).await
}

async fn move_door(
    command: &dyn Command,
    action: DoorAction,
    doorway_id: Uuid,
    side: DoorSide,
    actor_id: Uuid,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    notifier: &Notifier<'_>,
) -> Result<ExitCommandResult, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        %doorway_id,
        %actor_id,
        "handling exits command"
    );

    let mut doorway = load(doorway_id, repo).await?;
    let door_use = DoorUse {
        side,
        actor_id,
        actor_location: notifier.location_of(actor_id),
    };

    if let Err(rejection) = attempt(
        &mut doorway,
        &action,
        &door_use,
        command.correlation_id(),
        clock,
    ) {
        debug!(?rejection, %doorway_id, "door transition refused");
        return Err(refuse(rejection, actor_id, notifier));
    }

    let result = persist(&doorway, repo).await?;
    if let (Some(near), Some(far)) = (doorway.leaf(side), doorway.leaf(side.opposite())) {
        notices::door_moved(notifier, action, actor_id, near, far);
    }
    Ok(result)
}

/// Handles the `OpenDoor` command: opens both leaves.
///
/// The actor must be standing beside the leaf on the command's side.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if the actor is elsewhere or the door is
/// open or locked, `DomainError::AggregateNotFound` for an unknown doorway,
/// or `DomainError` if event loading or appending fails.
pub async fn handle_open_door(
    command: &OpenDoor,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    notifier: &Notifier<'_>,
) -> Result<ExitCommandResult, DomainError> {
    move_door(
        command,
        DoorAction::Open,
        command.doorway_id,
        command.side,
        command.actor_id,
        clock,
        repo,
        notifier,
    )
    .await
}

/// Handles the `CloseDoor` command: closes both leaves.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if the actor is elsewhere or the door is
/// closed or locked, `DomainError::AggregateNotFound` for an unknown
/// doorway, or `DomainError` if event loading or appending fails.
pub async fn handle_close_door(
    command: &CloseDoor,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    notifier: &Notifier<'_>,
) -> Result<ExitCommandResult, DomainError> {
    move_door(
        command,
        DoorAction::Close,
        command.doorway_id,
        command.side,
        command.actor_id,
        clock,
        repo,
        notifier,
    )
    .await
}

/// Handles the `LockDoor` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` unless the doorway is closed, or
/// `DomainError` if event loading or appending fails.
pub async fn handle_lock_door(
    command: &LockDoor,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ExitCommandResult, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        doorway_id = %command.doorway_id,
        "handling exits command"
    );

    let mut doorway = load(command.doorway_id, repo).await?;
    doorway.lock(command.correlation_id, clock)?;
    persist(&doorway, repo).await
}

/// Handles the `UnlockDoor` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` unless the doorway is locked, or
/// `DomainError` if event loading or appending fails.
pub async fn handle_unlock_door(
    command: &UnlockDoor,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ExitCommandResult, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        doorway_id = %command.doorway_id,
        "handling exits command"
    );

    let mut doorway = load(command.doorway_id, repo).await?;
    doorway.unlock(command.correlation_id, clock)?;
    persist(&doorway, repo).await
}

/// Handles the `TraverseDoor` command: decides whether the actor may pass
/// and where to.
///
/// The actor's posture is not consulted here; callers run the movement gate
/// of the character context first.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if the actor is not beside the leaf, the
/// door is not open, or access is refused, `DomainError::AggregateNotFound`
/// for an unknown doorway, or `DomainError` if event loading fails.
pub async fn handle_traverse_door(
    command: &TraverseDoor,
    repo: &dyn EventRepository,
    access: &dyn AccessControl,
    notifier: &Notifier<'_>,
) -> Result<Traversal, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        doorway_id = %command.doorway_id,
        actor_id = %command.actor_id,
        "handling exits command"
    );

    let doorway = load(command.doorway_id, repo).await?;
    let exit_id = doorway
        .leaf(command.side)
        .map_or(command.doorway_id, |leaf| leaf.exit_id);
    let permitted = access.has_permission(command.actor_id, exit_id, Capability::Traverse);
    let actor_location = notifier.location_of(command.actor_id);

    doorway
        .check_traversal(command.side, actor_location, permitted)
        .map(|destination| Traversal { destination })
        .map_err(|rejection| {
            debug!(?rejection, doorway_id = %command.doorway_id, "traversal refused");
            let door_name = notifier.name(exit_id, command.actor_id);
            refuse(rejection.into_failure(&door_name), command.actor_id, notifier)
        })
}

/// Finds the side of `doorway_id` whose leaf is the exit entity `exit_id`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown doorway and
/// `DomainError::Validation` if the exit does not belong to it.
pub async fn resolve_side(
    doorway_id: Uuid,
    exit_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<DoorSide, DomainError> {
    let doorway = load(doorway_id, repo).await?;
    doorway.side_of(exit_id).ok_or_else(|| {
        DomainError::Validation(format!(
            "exit {exit_id} is not a leaf of doorway {doorway_id}"
        ))
    })
}
