//! Query handlers for the Character context.

use serde::Serialize;
use threshold_core::aggregate::AggregateRoot;
use threshold_core::error::DomainError;
use threshold_core::repository::EventRepository;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::posture::Posture;

/// Read-only view of a character aggregate.
#[derive(Debug, Serialize)]
pub struct CharacterView {
    /// The character identifier.
    pub character_id: Uuid,
    /// The character's name.
    pub name: String,
    /// The current posture.
    pub posture: Posture,
    /// Current version (event count).
    pub version: i64,
}

/// Retrieves a character by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_character_by_id(
    character_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<CharacterView, DomainError> {
    let character = command_handlers::load(character_id, repo).await?;
    Ok(CharacterView {
        character_id,
        name: character.name().unwrap_or_default().to_owned(),
        posture: character.posture(),
        version: character.version(),
    })
}
