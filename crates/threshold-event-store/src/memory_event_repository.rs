//! In-memory implementation of the `EventRepository` trait.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use threshold_core::error::DomainError;
use threshold_core::repository::{EventRepository, StoredEvent};
use tracing::warn;
use uuid::Uuid;

/// Event streams kept in process memory, one per aggregate.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: Mutex<HashMap<Uuid, Vec<StoredEvent>>>,
}

impl InMemoryEventRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> DomainError {
    DomainError::Infrastructure("event stream lock poisoned".into())
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self.streams.lock().map_err(poisoned)?;
        Ok(streams.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        let mut streams = self.streams.lock().map_err(poisoned)?;
        let stream = streams.entry(aggregate_id).or_default();
        let actual = i64::try_from(stream.len())
            .map_err(|e| DomainError::Infrastructure(format!("stream too long: {e}")))?;

        if actual != expected_version {
            warn!(%aggregate_id, expected_version, actual, "stale append refused");
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        stream.extend_from_slice(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use threshold_core::error::DomainError;
    use threshold_core::repository::{EventRepository, StoredEvent};
    use uuid::Uuid;

    use super::InMemoryEventRepository;

    fn make_stored_event(aggregate_id: Uuid, sequence_number: i64) -> StoredEvent {
        StoredEvent {
            event_id: Uuid::new_v4(),
            aggregate_id,
            event_type: "TestEvent".to_owned(),
            payload: serde_json::json!({"key": "value"}),
            sequence_number,
            correlation_id: Uuid::new_v4(),
            causation_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_load_events_returns_empty_vec_for_unknown_aggregate() {
        let repo = InMemoryEventRepository::new();

        let events = repo.load_events(Uuid::new_v4()).await.unwrap();

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_sequential_appends_preserve_order() {
        // Arrange
        let repo = InMemoryEventRepository::new();
        let aggregate_id = Uuid::new_v4();

        // Act
        repo.append_events(
            aggregate_id,
            0,
            &[
                make_stored_event(aggregate_id, 1),
                make_stored_event(aggregate_id, 2),
            ],
        )
        .await
        .unwrap();
        repo.append_events(aggregate_id, 2, &[make_stored_event(aggregate_id, 3)])
            .await
            .unwrap();

        // Assert
        let loaded = repo.load_events(aggregate_id).await.unwrap();
        let sequence: Vec<i64> = loaded.iter().map(|e| e.sequence_number).collect();
        assert_eq!(sequence, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_stale_expected_version_is_refused_without_writing() {
        // Arrange
        let repo = InMemoryEventRepository::new();
        let aggregate_id = Uuid::new_v4();
        repo.append_events(aggregate_id, 0, &[make_stored_event(aggregate_id, 1)])
            .await
            .unwrap();

        // Act
        let result = repo
            .append_events(aggregate_id, 0, &[make_stored_event(aggregate_id, 1)])
            .await;

        // Assert
        match result {
            Err(DomainError::ConcurrencyConflict {
                aggregate_id: conflict_agg_id,
                expected,
                actual,
            }) => {
                assert_eq!(conflict_agg_id, aggregate_id);
                assert_eq!(expected, 0);
                assert_eq!(actual, 1);
            }
            other => panic!("expected ConcurrencyConflict, got {other:?}"),
        }
        assert_eq!(repo.load_events(aggregate_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_streams_are_isolated_per_aggregate() {
        let repo = InMemoryEventRepository::new();
        let (agg_a, agg_b) = (Uuid::new_v4(), Uuid::new_v4());

        repo.append_events(agg_a, 0, &[make_stored_event(agg_a, 1)])
            .await
            .unwrap();
        repo.append_events(agg_b, 0, &[make_stored_event(agg_b, 1)])
            .await
            .unwrap();

        assert_eq!(repo.load_events(agg_a).await.unwrap()[0].aggregate_id, agg_a);
        assert_eq!(repo.load_events(agg_b).await.unwrap()[0].aggregate_id, agg_b);
    }
}
