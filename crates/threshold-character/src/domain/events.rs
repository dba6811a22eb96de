//! Domain events for the Character context.

use serde::{Deserialize, Serialize};
use threshold_core::event::{DomainEvent, EventMetadata};
use uuid::Uuid;

use super::posture::Posture;

/// Event type identifier for [`CharacterCreated`].
pub const CHARACTER_CREATED_EVENT_TYPE: &str = "character.created";

/// Event type identifier for [`PostureChanged`].
pub const POSTURE_CHANGED_EVENT_TYPE: &str = "character.posture_changed";

/// Emitted when a character is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCreated {
    /// The character identifier.
    pub character_id: Uuid,
    /// The character's name.
    pub name: String,
}

/// Emitted when a character's posture changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostureChanged {
    /// The character identifier.
    pub character_id: Uuid,
    /// The posture before the change.
    pub from: Posture,
    /// The posture after the change.
    pub to: Posture,
}

/// Event payload variants for the Character context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CharacterEventKind {
    /// A character has been created.
    CharacterCreated(CharacterCreated),
    /// A character has changed posture.
    PostureChanged(PostureChanged),
}

impl CharacterEventKind {
    /// Returns the event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CharacterCreated(_) => CHARACTER_CREATED_EVENT_TYPE,
            Self::PostureChanged(_) => POSTURE_CHANGED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Character context.
#[derive(Debug, Clone)]
pub struct CharacterEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: CharacterEventKind,
}

impl DomainEvent for CharacterEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("CharacterEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
