//! Routes for the Exits bounded context.
//!
//! Open, close and traverse requests name the exit the actor is using; the
//! route resolves which side of the doorway that is before dispatching.

use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use threshold_character::application::command_handlers::handle_authorize_movement;
use threshold_character::domain::commands::AuthorizeMovement;
use threshold_exits::application::command_handlers;
use threshold_exits::application::query_handlers::{self, DoorwayView};
use threshold_exits::domain::commands;
use threshold_exits::domain::door::DoorLeaf;

use crate::error::ApiError;
use crate::routes::CommandResponse;
use crate::state::AppState;
use crate::world::{Delivery, Mailbox};

/// Request body for POST /build.
#[derive(Debug, Deserialize)]
pub struct BuildDoorwayRequest {
    /// The doorway identifier; generated when omitted.
    pub doorway_id: Option<Uuid>,
    /// The front leaf.
    pub front: DoorLeaf,
    /// The back leaf.
    pub back: DoorLeaf,
}

/// Request body for POST /open, /close and /traverse.
#[derive(Debug, Deserialize)]
pub struct DoorUseRequest {
    /// The doorway being used.
    pub doorway_id: Uuid,
    /// The leaf the actor is standing at.
    pub exit_id: Uuid,
    /// The acting actor.
    pub actor_id: Uuid,
}

/// Request body for POST /lock and /unlock.
#[derive(Debug, Deserialize)]
pub struct DoorwayRequest {
    /// The doorway to lock or unlock.
    pub doorway_id: Uuid,
}

/// Response body for a successful traversal.
#[derive(Debug, Serialize)]
pub struct TraversalResponse {
    /// Where the actor now is.
    pub destination: Uuid,
    /// Everything actors were told while handling the request.
    pub messages: Vec<Delivery>,
}

/// POST /build
#[instrument(skip(state, request))]
async fn build_doorway(
    State(state): State<AppState>,
    Json(request): Json<BuildDoorwayRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::BuildDoorway {
        correlation_id: Uuid::new_v4(),
        doorway_id: request.doorway_id.unwrap_or_else(Uuid::new_v4),
        front: request.front,
        back: request.back,
    };

    let result = command_handlers::handle_build_doorway(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(CommandResponse::new(
        result.aggregate_id,
        &result.stored_events,
        Vec::new(),
    )))
}

/// POST /open
#[instrument(skip(state, request), fields(doorway_id = %request.doorway_id, actor_id = %request.actor_id))]
async fn open_door(
    State(state): State<AppState>,
    Json(request): Json<DoorUseRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let side = command_handlers::resolve_side(
        request.doorway_id,
        request.exit_id,
        &*state.event_repository,
    )
    .await?;
    let command = commands::OpenDoor {
        correlation_id: Uuid::new_v4(),
        doorway_id: request.doorway_id,
        side,
        actor_id: request.actor_id,
    };
    let mailbox = Mailbox::new();

    let result = command_handlers::handle_open_door(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
        &state.notifier(&mailbox),
    )
    .await?;

    Ok(Json(CommandResponse::new(
        result.aggregate_id,
        &result.stored_events,
        mailbox.drain(),
    )))
}

/// POST /close
#[instrument(skip(state, request), fields(doorway_id = %request.doorway_id, actor_id = %request.actor_id))]
async fn close_door(
    State(state): State<AppState>,
    Json(request): Json<DoorUseRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let side = command_handlers::resolve_side(
        request.doorway_id,
        request.exit_id,
        &*state.event_repository,
    )
    .await?;
    let command = commands::CloseDoor {
        correlation_id: Uuid::new_v4(),
        doorway_id: request.doorway_id,
        side,
        actor_id: request.actor_id,
    };
    let mailbox = Mailbox::new();

    let result = command_handlers::handle_close_door(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
        &state.notifier(&mailbox),
    )
    .await?;

    Ok(Json(CommandResponse::new(
        result.aggregate_id,
        &result.stored_events,
        mailbox.drain(),
    )))
}

/// POST /lock
#[instrument(skip(state))]
async fn lock_door(
    State(state): State<AppState>,
    Json(request): Json<DoorwayRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::LockDoor {
        correlation_id: Uuid::new_v4(),
        doorway_id: request.doorway_id,
    };

    let result = command_handlers::handle_lock_door(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(CommandResponse::new(
        result.aggregate_id,
        &result.stored_events,
        Vec::new(),
    )))
}

/// POST /unlock
#[instrument(skip(state))]
async fn unlock_door(
    State(state): State<AppState>,
    Json(request): Json<DoorwayRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::UnlockDoor {
        correlation_id: Uuid::new_v4(),
        doorway_id: request.doorway_id,
    };

    let result = command_handlers::handle_unlock_door(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(CommandResponse::new(
        result.aggregate_id,
        &result.stored_events,
        Vec::new(),
    )))
}

/// POST /traverse
///
/// The actor must be standing, the door open and the leaf's traverse
/// permission granted, checked in that order. On success the actor is moved
/// to the far location.
#[instrument(skip(state, request), fields(doorway_id = %request.doorway_id, actor_id = %request.actor_id))]
async fn traverse_door(
    State(state): State<AppState>,
    Json(request): Json<DoorUseRequest>,
) -> Result<Json<TraversalResponse>, ApiError> {
    let side = command_handlers::resolve_side(
        request.doorway_id,
        request.exit_id,
        &*state.event_repository,
    )
    .await?;
    let correlation_id = Uuid::new_v4();
    let mailbox = Mailbox::new();
    let notifier = state.notifier(&mailbox);

    handle_authorize_movement(
        &AuthorizeMovement {
            correlation_id,
            character_id: request.actor_id,
        },
        &*state.event_repository,
        &notifier,
    )
    .await?;

    let traversal = command_handlers::handle_traverse_door(
        &commands::TraverseDoor {
            correlation_id,
            doorway_id: request.doorway_id,
            side,
            actor_id: request.actor_id,
        },
        &*state.event_repository,
        &*state.world,
        &notifier,
    )
    .await?;

    state.world.place(request.actor_id, Some(traversal.destination));
    info!(destination = %traversal.destination, "actor moved through doorway");

    Ok(Json(TraversalResponse {
        destination: traversal.destination,
        messages: mailbox.drain(),
    }))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_doorway(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DoorwayView>, ApiError> {
    let view = query_handlers::get_doorway_by_id(id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// Returns the router for the exits context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/build", post(build_doorway))
        .route("/open", post(open_door))
        .route("/close", post(close_door))
        .route("/lock", post(lock_door))
        .route("/unlock", post(unlock_door))
        .route("/traverse", post(traverse_door))
        .route("/{id}", get(get_doorway))
}
