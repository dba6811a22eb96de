//! Command handlers for the Character context.
//!
//! Handlers load the character, decide, append with optimistic concurrency
//! and announce only once the append has succeeded.

use threshold_core::aggregate::AggregateRoot;
use threshold_core::clock::Clock;
use threshold_core::command::Command;
use threshold_core::error::DomainError;
use threshold_core::ports::Notifier;
use threshold_core::repository::{EventRepository, StoredEvent};
use threshold_core::transition::{attempt, refuse};
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::notices;
use crate::domain::aggregates::Character;
use crate::domain::commands::{AuthorizeMovement, ChangePosture, CreateCharacter};
use crate::domain::events::{CharacterEvent, CharacterEventKind};

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct CharacterCommandResult {
    /// The aggregate ID affected by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
}

/// Reconstitutes a `Character` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    character_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<Character, DomainError> {
    let mut character = Character::new(character_id);
    for stored in existing_events {
        let (metadata, kind) = stored.decode::<CharacterEventKind>()?;
        character.apply(&CharacterEvent { metadata, kind });
    }
    Ok(character)
}

/// Loads an existing character.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
pub(crate) async fn load(
    character_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<Character, DomainError> {
    let existing_events = repo.load_events(character_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(character_id));
    }
    reconstitute(character_id, &existing_events)
}

async fn persist(
    character: &Character,
    repo: &dyn EventRepository,
) -> Result<CharacterCommandResult, DomainError> {
    let stored_events: Vec<StoredEvent> = character
        .uncommitted_events()
        .iter()
        .map(|event| StoredEvent::from_domain_event(event))
        .collect();

    repo.append_events(character.id, character.version(), &stored_events)
        .await?;

    Ok(CharacterCommandResult {
        aggregate_id: character.id,
        stored_events,
    })
}

/// Handles the `CreateCharacter` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the name is blank or the character
/// already exists, or `DomainError` if event loading or appending fails.
pub async fn handle_create_character(
    command: &CreateCharacter,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<CharacterCommandResult, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        "handling character command"
    );

    let existing_events = repo.load_events(command.character_id).await?;
    let mut character = reconstitute(command.character_id, &existing_events)?;

    character.create(&command.name, command.correlation_id, clock)?;

    persist(&character, repo).await
}

/// Handles the `ChangePosture` command through the posture state machine.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if the character already holds the
/// posture, `DomainError::AggregateNotFound` for an unknown character, or
/// `DomainError` if event loading or appending fails.
pub async fn handle_change_posture(
    command: &ChangePosture,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    notifier: &Notifier<'_>,
) -> Result<CharacterCommandResult, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        posture = ?command.posture,
        "handling character command"
    );

    let mut character = load(command.character_id, repo).await?;

    if let Err(rejection) = attempt(
        &mut character,
        &command.posture,
        &(),
        command.correlation_id,
        clock,
    ) {
        debug!(?rejection, character_id = %command.character_id, "posture change refused");
        return Err(refuse(rejection, command.character_id, notifier));
    }

    let result = persist(&character, repo).await?;
    notices::posture_changed(notifier, command.character_id, command.posture);
    Ok(result)
}

/// Handles the `AuthorizeMovement` command: succeeds, without recording
/// anything, only when the character is standing.
///
/// # Errors
///
/// Returns `DomainError::Rejected` ("You must be standing to move.") for a
/// character in any other posture, or `DomainError::AggregateNotFound` for
/// an unknown character.
pub async fn handle_authorize_movement(
    command: &AuthorizeMovement,
    repo: &dyn EventRepository,
    notifier: &Notifier<'_>,
) -> Result<(), DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        "handling character command"
    );

    let character = load(command.character_id, repo).await?;
    character.check_movement().map_err(|rejection| {
        debug!(?rejection, character_id = %command.character_id, "movement refused");
        refuse(rejection, command.character_id, notifier)
    })
}
