//! Routes for the Inventory & Equipment bounded context.

use axum::extract::{Path, Query, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use threshold_inventory::application::command_handlers;
use threshold_inventory::application::query_handlers::{self, InventoryView};
use threshold_inventory::domain::commands;
use threshold_inventory::domain::slots::Hand;

use crate::error::ApiError;
use crate::routes::CommandResponse;
use crate::state::AppState;
use crate::world::Mailbox;

/// Request body for POST /create.
#[derive(Debug, Deserialize)]
pub struct CreateInventoryRequest {
    /// The actor the inventory belongs to.
    pub actor_id: Uuid,
    /// The dominant hand; right when omitted.
    pub dominant_hand: Option<Hand>,
}

/// Request body for POST /pick-up.
#[derive(Debug, Deserialize)]
pub struct PickUpRequest {
    /// The acting actor.
    pub actor_id: Uuid,
    /// The catalogued item to pick up.
    pub item_id: Uuid,
}

/// Request body for POST /drop, /wear and /remove.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    /// The acting actor.
    pub actor_id: Uuid,
    /// The item acted on.
    pub item_id: Uuid,
}

/// Query string for the description endpoints.
#[derive(Debug, Deserialize)]
pub struct DescriptionQuery {
    /// Whose point of view to describe from; the owner when omitted.
    pub viewer: Option<Uuid>,
}

/// Response body for the description endpoints.
#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    /// The rendered description.
    pub text: String,
}

/// POST /create
#[instrument(skip(state, request), fields(actor_id = %request.actor_id))]
async fn create_inventory(
    State(state): State<AppState>,
    Json(request): Json<CreateInventoryRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::CreateInventory {
        correlation_id: Uuid::new_v4(),
        actor_id: request.actor_id,
        dominant_hand: request.dominant_hand,
    };

    let result = command_handlers::handle_create_inventory(
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

/// POST /pick-up
#[instrument(skip(state, request), fields(actor_id = %request.actor_id, item_id = %request.item_id))]
async fn pick_up_item(
    State(state): State<AppState>,
    Json(request): Json<PickUpRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::PickUpItem {
        correlation_id: Uuid::new_v4(),
        actor_id: request.actor_id,
        item_id: request.item_id,
    };
    let mailbox = Mailbox::new();

    let result = command_handlers::handle_pick_up_item(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
        &*state.world,
        &state.notifier(&mailbox),
    )
    .await?;

    Ok(Json(CommandResponse::new(
        result.aggregate_id,
        &result.stored_events,
        mailbox.drain(),
    )))
}

/// POST /drop
#[instrument(skip(state, request), fields(actor_id = %request.actor_id, item_id = %request.item_id))]
async fn drop_item(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::DropItem {
        correlation_id: Uuid::new_v4(),
        actor_id: request.actor_id,
        item_id: request.item_id,
    };
    let mailbox = Mailbox::new();

    let result = command_handlers::handle_drop_item(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
        &*state.world,
        &state.notifier(&mailbox),
    )
    .await?;

    Ok(Json(CommandResponse::new(
        result.aggregate_id,
        &result.stored_events,
        mailbox.drain(),
    )))
}

/// POST /wear
#[instrument(skip(state, request), fields(actor_id = %request.actor_id, item_id = %request.item_id))]
async fn wear_item(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::WearItem {
        correlation_id: Uuid::new_v4(),
        actor_id: request.actor_id,
        item_id: request.item_id,
    };
    let mailbox = Mailbox::new();

    let result = command_handlers::handle_wear_item(
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

/// POST /remove
#[instrument(skip(state, request), fields(actor_id = %request.actor_id, item_id = %request.item_id))]
async fn remove_item(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::RemoveItem {
        correlation_id: Uuid::new_v4(),
        actor_id: request.actor_id,
        item_id: request.item_id,
    };
    let mailbox = Mailbox::new();

    let result = command_handlers::handle_remove_item(
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

/// GET /{id}
#[instrument(skip(state))]
async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InventoryView>, ApiError> {
    let view = query_handlers::get_inventory_by_id(id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// GET /{id}/equipment
#[instrument(skip(state))]
async fn describe_equipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DescriptionQuery>,
) -> Result<Json<DescriptionResponse>, ApiError> {
    let text = query_handlers::describe_equipment(
        id,
        query.viewer.unwrap_or(id),
        &*state.world,
        &*state.event_repository,
    )
    .await?;
    Ok(Json(DescriptionResponse { text }))
}

/// GET /{id}/description
#[instrument(skip(state))]
async fn describe_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DescriptionQuery>,
) -> Result<Json<DescriptionResponse>, ApiError> {
    let text = query_handlers::describe_inventory(
        id,
        query.viewer.unwrap_or(id),
        &*state.world,
        &*state.event_repository,
    )
    .await?;
    Ok(Json(DescriptionResponse { text }))
}

/// Returns the router for the inventory context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_inventory))
        .route("/pick-up", post(pick_up_item))
        .route("/drop", post(drop_item))
        .route("/wear", post(wear_item))
        .route("/remove", post(remove_item))
        .route("/{id}", get(get_inventory))
        .route("/{id}/equipment", get(describe_equipment))
        .route("/{id}/description", get(describe_inventory))
}
