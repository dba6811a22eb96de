//! Integration tests for `PgEventRepository`.
//!
//! These need a running PostgreSQL reachable through `DATABASE_URL`; run
//! them with `cargo test -p threshold-event-store -- --ignored`.

use sqlx::PgPool;
use threshold_character::domain::aggregates::Character;
use threshold_character::domain::events::CharacterEventKind;
use threshold_core::aggregate::AggregateRoot;
use threshold_core::error::DomainError;
use threshold_core::repository::{EventRepository, StoredEvent};
use threshold_core::transition::attempt;
use threshold_event_store::pg_event_repository::PgEventRepository;
use threshold_exits::domain::aggregates::{DoorAction, DoorUse, Doorway};
use threshold_exits::domain::door::{DoorLeaf, DoorSide};
use threshold_exits::domain::events::{ExitEvent, ExitEventKind};
use threshold_inventory::domain::aggregates::{Inventory, PickUp, Wear};
use threshold_inventory::domain::events::{InventoryEvent, InventoryEventKind};
use threshold_inventory::domain::slots::{EquipmentSlot, Hand, Item};
use threshold_test_support::FixedClock;
use uuid::Uuid;

fn stored<E: threshold_core::event::DomainEvent>(events: &[E]) -> Vec<StoredEvent> {
    events
        .iter()
        .map(|event| StoredEvent::from_domain_event(event))
        .collect()
}

/// An inventory that picked up `shirt` and put it on.
fn dressed_inventory(actor_id: Uuid, shirt: Item) -> Vec<StoredEvent> {
    let clock = FixedClock::standard();
    let mut inventory = Inventory::new(actor_id);
    inventory
        .create(Hand::Right, Uuid::new_v4(), &clock)
        .unwrap();
    attempt(&mut inventory, &PickUp(shirt), &(), Uuid::new_v4(), &clock).unwrap();
    attempt(&mut inventory, &Wear(shirt.id), &(), Uuid::new_v4(), &clock).unwrap();
    stored(inventory.uncommitted_events())
}

/// A doorway built and then worked through `actions` from its front leaf.
fn worked_doorway(doorway_id: Uuid, front: &DoorLeaf, actions: &[DoorAction]) -> Vec<StoredEvent> {
    let clock = FixedClock::standard();
    let mut doorway = Doorway::new(doorway_id);
    doorway
        .build(
            front.clone(),
            DoorLeaf::new(Uuid::new_v4(), Uuid::new_v4()),
            Uuid::new_v4(),
            &clock,
        )
        .unwrap();
    let door_use = DoorUse {
        side: DoorSide::Front,
        actor_id: Uuid::new_v4(),
        actor_location: Some(front.location_id),
    };
    for action in actions {
        attempt(&mut doorway, action, &door_use, Uuid::new_v4(), &clock).unwrap();
    }
    stored(doorway.uncommitted_events())
}

fn assert_conflict(result: Result<(), DomainError>, stream: Uuid, expected: i64, actual: i64) {
    match result {
        Err(DomainError::ConcurrencyConflict {
            aggregate_id,
            expected: e,
            actual: a,
        }) => {
            assert_eq!(aggregate_id, stream);
            assert_eq!(e, expected);
            assert_eq!(a, actual);
        }
        other => panic!("expected ConcurrencyConflict, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_load_events_returns_empty_vec_for_unknown_stream(pool: PgPool) {
    let repo = PgEventRepository::new(pool);

    let events = repo.load_events(Uuid::new_v4()).await.unwrap();

    assert!(events.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_inventory_history_round_trips_and_replays(pool: PgPool) {
    // Arrange
    let repo = PgEventRepository::new(pool);
    let actor_id = Uuid::new_v4();
    let shirt = Item::wearable(Uuid::new_v4(), EquipmentSlot::Torso);
    let history = dressed_inventory(actor_id, shirt);
    let stream_id = Inventory::stream_id(actor_id);

    // Act
    repo.append_events(stream_id, 0, &history).await.unwrap();
    let loaded = repo.load_events(stream_id).await.unwrap();

    // Assert
    assert_eq!(loaded.len(), 3);
    for (original, back) in history.iter().zip(&loaded) {
        assert_eq!(back.event_id, original.event_id);
        assert_eq!(back.aggregate_id, stream_id);
        assert_eq!(back.event_type, original.event_type);
        assert_eq!(back.payload, original.payload);
        assert_eq!(back.sequence_number, original.sequence_number);
        assert_eq!(back.correlation_id, original.correlation_id);
        assert_eq!(back.causation_id, original.causation_id);
        assert_eq!(back.occurred_at, original.occurred_at);
    }

    let mut replayed = Inventory::new(actor_id);
    for event in &loaded {
        let (metadata, kind) = event.decode::<InventoryEventKind>().unwrap();
        replayed.apply(&InventoryEvent { metadata, kind });
    }
    assert_eq!(replayed.version(), 3);
    assert_eq!(replayed.worn(EquipmentSlot::Torso), Some(shirt));
    assert_eq!(replayed.free_hand(), Some(Hand::Right));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_character_and_inventory_of_one_actor_use_separate_streams(pool: PgPool) {
    // Arrange
    let repo = PgEventRepository::new(pool);
    let actor_id = Uuid::new_v4();
    let mut character = Character::new(actor_id);
    character
        .create("Ada", Uuid::new_v4(), &FixedClock::standard())
        .unwrap();
    let shirt = Item::wearable(Uuid::new_v4(), EquipmentSlot::Torso);

    // Act
    repo.append_events(actor_id, 0, &stored(character.uncommitted_events()))
        .await
        .unwrap();
    repo.append_events(
        Inventory::stream_id(actor_id),
        0,
        &dressed_inventory(actor_id, shirt),
    )
    .await
    .unwrap();

    // Assert
    let character_stream = repo.load_events(actor_id).await.unwrap();
    let inventory_stream = repo
        .load_events(Inventory::stream_id(actor_id))
        .await
        .unwrap();
    assert_eq!(character_stream.len(), 1);
    assert_eq!(inventory_stream.len(), 3);
    assert!(matches!(
        character_stream[0].decode::<CharacterEventKind>().unwrap().1,
        CharacterEventKind::CharacterCreated(_)
    ));
    assert!(
        inventory_stream
            .iter()
            .all(|event| event.decode::<InventoryEventKind>().is_ok())
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_second_writer_from_the_same_doorway_version_conflicts(pool: PgPool) {
    // Arrange
    let repo = PgEventRepository::new(pool);
    let doorway_id = Uuid::new_v4();
    let front = DoorLeaf::new(Uuid::new_v4(), Uuid::new_v4());
    let opened = worked_doorway(doorway_id, &front, &[DoorAction::Open]);
    repo.append_events(doorway_id, 0, &opened[..1]).await.unwrap();

    // Act
    let winner = repo.append_events(doorway_id, 1, &opened[1..]).await;
    let loser = repo.append_events(doorway_id, 1, &opened[1..]).await;

    // Assert
    assert!(winner.is_ok());
    assert_conflict(loser, doorway_id, 1, 2);
    let loaded = repo.load_events(doorway_id).await.unwrap();
    assert!(matches!(
        loaded[1].decode::<ExitEventKind>().unwrap().1,
        ExitEventKind::DoorOpened(_)
    ));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_stale_expected_version_conflicts_without_colliding_sequences(pool: PgPool) {
    // Arrange
    let repo = PgEventRepository::new(pool);
    let doorway_id = Uuid::new_v4();
    let front = DoorLeaf::new(Uuid::new_v4(), Uuid::new_v4());
    let history = worked_doorway(
        doorway_id,
        &front,
        &[DoorAction::Open, DoorAction::Close],
    );
    repo.append_events(doorway_id, 0, &history[..2]).await.unwrap();

    // Act
    let result = repo.append_events(doorway_id, 0, &history[2..]).await;

    // Assert
    assert_conflict(result, doorway_id, 0, 2);
    assert_eq!(repo.load_events(doorway_id).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_doorway_replays_to_its_last_state(pool: PgPool) {
    let repo = PgEventRepository::new(pool);
    let doorway_id = Uuid::new_v4();
    let front = DoorLeaf::new(Uuid::new_v4(), Uuid::new_v4());
    let history = worked_doorway(doorway_id, &front, &[DoorAction::Open]);

    repo.append_events(doorway_id, 0, &history).await.unwrap();

    let mut replayed = Doorway::new(doorway_id);
    for event in repo.load_events(doorway_id).await.unwrap() {
        let (metadata, kind) = event.decode::<ExitEventKind>().unwrap();
        replayed.apply(&ExitEvent { metadata, kind });
    }
    assert_eq!(replayed.version(), 2);
    assert_eq!(replayed.leaf(DoorSide::Front), Some(&front));
    assert!(
        replayed
            .check_traversal(DoorSide::Front, Some(front.location_id), true)
            .is_ok()
    );
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL"]
async fn test_ensure_schema_bootstraps_an_empty_database(pool: PgPool) {
    let repo = PgEventRepository::new(pool);
    let doorway_id = Uuid::new_v4();
    let front = DoorLeaf::new(Uuid::new_v4(), Uuid::new_v4());

    repo.ensure_schema().await.unwrap();
    repo.ensure_schema().await.unwrap();
    repo.append_events(doorway_id, 0, &worked_doorway(doorway_id, &front, &[]))
        .await
        .unwrap();

    assert_eq!(repo.load_events(doorway_id).await.unwrap().len(), 1);
}
