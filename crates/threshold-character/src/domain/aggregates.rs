//! Aggregate roots for the Character context.

use threshold_core::aggregate::AggregateRoot;
use threshold_core::clock::Clock;
use threshold_core::error::DomainError;
use threshold_core::event::EventMetadata;
use threshold_core::transition::GuardedTransition;
use uuid::Uuid;

use super::events::{CharacterCreated, CharacterEvent, CharacterEventKind, PostureChanged};
use super::posture::Posture;
use super::rejections::{MovementRejection, PostureRejection};

/// The aggregate root for a character.
///
/// The aggregate id is the actor id, shared with the actor's inventory.
#[derive(Debug)]
pub struct Character {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (persisted event count).
    pub(crate) version: i64,
    name: Option<String>,
    posture: Posture,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<CharacterEvent>,
}

impl Character {
    /// Creates an empty, not yet named character.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            name: None,
            posture: Posture::default(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, kind: CharacterEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let metadata = EventMetadata::record(
            kind.event_type(),
            self.id,
            self.next_sequence_number(),
            correlation_id,
            clock,
        );
        self.mutate(&kind);
        self.uncommitted_events.push(CharacterEvent { metadata, kind });
    }

    fn mutate(&mut self, kind: &CharacterEventKind) {
        match kind {
            CharacterEventKind::CharacterCreated(payload) => {
                self.name = Some(payload.name.clone());
                self.posture = Posture::Standing;
            }
            CharacterEventKind::PostureChanged(payload) => {
                self.posture = payload.to;
            }
        }
    }

    /// Names the character, producing a `CharacterCreated` event. The
    /// character starts out standing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is blank or the
    /// character already exists.
    pub fn create(
        &mut self,
        name: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "character name must not be empty".into(),
            ));
        }
        if self.name.is_some() {
            return Err(DomainError::Validation(format!(
                "character {} already exists",
                self.id
            )));
        }
        self.record(
            CharacterEventKind::CharacterCreated(CharacterCreated {
                character_id: self.id,
                name: name.to_owned(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Returns the character's name, once created.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the current posture.
    #[must_use]
    pub fn posture(&self) -> Posture {
        self.posture
    }

    /// The movement gate: only a standing character may change location.
    ///
    /// # Errors
    ///
    /// Returns `MovementRejection::NotStanding` for any other posture.
    pub fn check_movement(&self) -> Result<(), MovementRejection> {
        if self.posture == Posture::Standing {
            Ok(())
        } else {
            Err(MovementRejection::NotStanding)
        }
    }
}

impl GuardedTransition<Posture> for Character {
    type Context = ();
    type Rejection = PostureRejection;

    fn can_transition(&self, target: &Posture, _context: &()) -> bool {
        *target != self.posture
    }

    fn apply_transition(
        &mut self,
        target: &Posture,
        _context: &(),
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        self.record(
            CharacterEventKind::PostureChanged(PostureChanged {
                character_id: self.id,
                from: self.posture,
                to: *target,
            }),
            correlation_id,
            clock,
        );
    }

    fn on_transition_failed(&self, _target: &Posture, _context: &()) -> PostureRejection {
        PostureRejection(self.posture)
    }
}

impl AggregateRoot for Character {
    type Event = CharacterEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        self.mutate(&event.kind);
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{CHARACTER_CREATED_EVENT_TYPE, POSTURE_CHANGED_EVENT_TYPE};
    use threshold_core::event::DomainEvent;
    use threshold_core::transition::attempt;
    use threshold_test_support::FixedClock;

    fn created_character() -> Character {
        let mut character = Character::new(Uuid::new_v4());
        character
            .create("Mara", Uuid::new_v4(), &FixedClock::standard())
            .unwrap();
        character
    }

    #[test]
    fn test_create_records_event_and_starts_standing() {
        // Arrange
        let clock = FixedClock::standard();
        let id = Uuid::new_v4();
        let mut character = Character::new(id);

        // Act
        character.create("  Mara ", Uuid::new_v4(), &clock).unwrap();

        // Assert
        assert_eq!(character.name(), Some("Mara"));
        assert_eq!(character.posture(), Posture::Standing);
        let events = character.uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), CHARACTER_CREATED_EVENT_TYPE);
        assert_eq!(events[0].metadata.aggregate_id, id);
        assert_eq!(events[0].metadata.sequence_number, 1);
        assert_eq!(events[0].metadata.occurred_at, clock.0);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut character = Character::new(Uuid::new_v4());

        let result = character.create("   ", Uuid::new_v4(), &FixedClock::standard());

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(character.uncommitted_events().is_empty());
    }

    #[test]
    fn test_create_twice_is_a_validation_error() {
        let mut character = created_character();

        let result = character.create("Mara", Uuid::new_v4(), &FixedClock::standard());

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(character.uncommitted_events().len(), 1);
    }

    #[test]
    fn test_every_posture_reaches_every_other_in_one_step() {
        for from in Posture::ALL {
            for to in Posture::ALL.into_iter().filter(|to| *to != from) {
                // Arrange
                let mut character = created_character();
                if from != Posture::Standing {
                    attempt(&mut character, &from, &(), Uuid::new_v4(), &FixedClock::standard())
                        .unwrap();
                }

                // Act
                let result =
                    attempt(&mut character, &to, &(), Uuid::new_v4(), &FixedClock::standard());

                // Assert
                assert!(result.is_ok(), "{from:?} -> {to:?}");
                assert_eq!(character.posture(), to);
            }
        }
    }

    #[test]
    fn test_posture_change_records_from_and_to() {
        // Arrange
        let mut character = created_character();

        // Act
        attempt(
            &mut character,
            &Posture::Sitting,
            &(),
            Uuid::new_v4(),
            &FixedClock::standard(),
        )
        .unwrap();

        // Assert
        let event = &character.uncommitted_events()[1];
        assert_eq!(event.event_type(), POSTURE_CHANGED_EVENT_TYPE);
        assert_eq!(event.metadata.sequence_number, 2);
        match &event.kind {
            CharacterEventKind::PostureChanged(payload) => {
                assert_eq!(payload.from, Posture::Standing);
                assert_eq!(payload.to, Posture::Sitting);
            }
            other => panic!("expected PostureChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_changing_to_current_posture_fails_without_events() {
        // Arrange
        let mut character = created_character();

        // Act
        let result = attempt(
            &mut character,
            &Posture::Standing,
            &(),
            Uuid::new_v4(),
            &FixedClock::standard(),
        );

        // Assert
        assert_eq!(result, Err(PostureRejection(Posture::Standing)));
        assert_eq!(character.uncommitted_events().len(), 1);
    }

    #[test]
    fn test_only_standing_characters_may_move() {
        let mut character = created_character();
        assert_eq!(character.check_movement(), Ok(()));

        attempt(
            &mut character,
            &Posture::Kneeling,
            &(),
            Uuid::new_v4(),
            &FixedClock::standard(),
        )
        .unwrap();

        assert_eq!(
            character.check_movement(),
            Err(MovementRejection::NotStanding)
        );
    }

    #[test]
    fn test_apply_replays_history_and_advances_version() {
        // Arrange
        let mut source = created_character();
        attempt(
            &mut source,
            &Posture::Lying,
            &(),
            Uuid::new_v4(),
            &FixedClock::standard(),
        )
        .unwrap();
        let mut replayed = Character::new(source.id);

        // Act
        for event in source.uncommitted_events() {
            replayed.apply(event);
        }

        // Assert
        assert_eq!(replayed.version(), 2);
        assert_eq!(replayed.name(), Some("Mara"));
        assert_eq!(replayed.posture(), Posture::Lying);
        assert!(replayed.uncommitted_events().is_empty());
    }
}
