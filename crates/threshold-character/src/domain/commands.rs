//! Commands for the Character context.

use threshold_core::command::Command;
use uuid::Uuid;

use super::posture::Posture;

/// Command to create a new character.
#[derive(Debug, Clone)]
pub struct CreateCharacter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier (the actor id).
    pub character_id: Uuid,
    /// The character's name.
    pub name: String,
}

impl Command for CreateCharacter {
    fn command_type(&self) -> &'static str {
        "character.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move a character into another posture.
#[derive(Debug, Clone)]
pub struct ChangePosture {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
    /// The posture to take.
    pub posture: Posture,
}

impl Command for ChangePosture {
    fn command_type(&self) -> &'static str {
        "character.change_posture"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Option<Uuid> {
        Some(self.character_id)
    }
}

/// Command asking whether a character may leave its location.
#[derive(Debug, Clone)]
pub struct AuthorizeMovement {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
}

impl Command for AuthorizeMovement {
    fn command_type(&self) -> &'static str {
        "character.authorize_movement"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Option<Uuid> {
        Some(self.character_id)
    }
}
