//! Query handlers for the Exits context.

use serde::Serialize;
use threshold_core::aggregate::AggregateRoot;
use threshold_core::error::DomainError;
use threshold_core::repository::EventRepository;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::door::{DoorLeaf, DoorSide, DoorState};

/// Read-only view of a doorway aggregate.
#[derive(Debug, Serialize)]
pub struct DoorwayView {
    /// The doorway identifier.
    pub doorway_id: Uuid,
    /// The state shared by both leaves.
    pub state: DoorState,
    /// The front leaf.
    pub front: Option<DoorLeaf>,
    /// The back leaf.
    pub back: Option<DoorLeaf>,
    /// Current version (event count).
    pub version: i64,
}

/// Retrieves a doorway by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_doorway_by_id(
    doorway_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<DoorwayView, DomainError> {
    let doorway = command_handlers::load(doorway_id, repo).await?;
    Ok(DoorwayView {
        doorway_id,
        state: doorway.state(),
        front: doorway.leaf(DoorSide::Front).cloned(),
        back: doorway.leaf(DoorSide::Back).cloned(),
        version: doorway.version(),
    })
}
