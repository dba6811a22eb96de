//! Route modules organized by bounded context.

use axum::Router;
use serde::Serialize;
use threshold_core::repository::StoredEvent;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;
use crate::world::Delivery;

pub mod characters;
pub mod exits;
pub mod health;
pub mod inventory;
pub mod world;

/// Response body returned after a command is successfully handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// The aggregate the command changed.
    pub aggregate_id: Uuid,
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
    /// Everything actors were told while handling the command.
    pub messages: Vec<Delivery>,
}

impl CommandResponse {
    pub(crate) fn new(
        aggregate_id: Uuid,
        stored_events: &[StoredEvent],
        messages: Vec<Delivery>,
    ) -> Self {
        Self {
            aggregate_id,
            event_ids: stored_events.iter().map(|e| e.event_id).collect(),
            messages,
        }
    }
}

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/world", world::router())
        .nest("/api/v1/characters", characters::router())
        .nest("/api/v1/inventory", inventory::router())
        .nest("/api/v1/exits", exits::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
