//! Routes for the world directory: entity names, locations, access and the
//! item catalog.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use threshold_core::error::DomainError;
use threshold_core::ports::Capability;
use threshold_inventory::domain::slots::{EquipmentSlot, Item};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::world::EntityView;

/// Request body for POST /entities.
#[derive(Debug, Deserialize)]
pub struct RegisterEntityRequest {
    /// The entity; a fresh id is assigned when omitted.
    pub id: Option<Uuid>,
    /// Display name.
    pub name: Option<String>,
    /// Current location.
    pub location_id: Option<Uuid>,
}

/// Request body for POST /items.
#[derive(Debug, Deserialize)]
pub struct RegisterItemRequest {
    /// The item; a fresh id is assigned when omitted.
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// The room the item lies in.
    pub location_id: Uuid,
    /// Where the item is worn, if it can be worn at all.
    pub wear_slot: Option<EquipmentSlot>,
}

/// Request and response body for POST /access.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessRule {
    /// The actor the rule applies to.
    pub actor_id: Uuid,
    /// The entity the rule guards.
    pub entity_id: Uuid,
    /// The capability granted or withheld.
    pub capability: Capability,
    /// Whether the capability is granted.
    pub allowed: bool,
}

/// POST /entities
#[instrument(skip(state, request))]
async fn register_entity(
    State(state): State<AppState>,
    Json(request): Json<RegisterEntityRequest>,
) -> Json<EntityView> {
    let id = request.id.unwrap_or_else(Uuid::new_v4);
    let view = state.world.register(id, request.name, request.location_id);
    info!(entity_id = %id, "entity registered");
    Json(view)
}

/// POST /items
#[instrument(skip(state, request), fields(location_id = %request.location_id))]
async fn register_item(
    State(state): State<AppState>,
    Json(request): Json<RegisterItemRequest>,
) -> Result<Json<EntityView>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(DomainError::Validation("item name must not be blank".to_owned()).into());
    }
    let id = request.id.unwrap_or_else(Uuid::new_v4);
    let item = match request.wear_slot {
        Some(slot) => Item::wearable(id, slot),
        None => Item::plain(id),
    };
    let view = state.world.register_item(item, request.name, request.location_id);
    info!(item_id = %id, wear_slot = ?request.wear_slot, "item catalogued");
    Ok(Json(view))
}

/// POST /access
#[instrument(skip(state), fields(actor_id = %rule.actor_id, entity_id = %rule.entity_id))]
async fn set_access(State(state): State<AppState>, Json(rule): Json<AccessRule>) -> Json<AccessRule> {
    state
        .world
        .set_access(rule.actor_id, rule.entity_id, rule.capability, rule.allowed);
    info!(capability = ?rule.capability, allowed = rule.allowed, "access rule set");
    Json(rule)
}

/// Returns the router for the world directory.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/entities", post(register_entity))
        .route("/items", post(register_item))
        .route("/access", post(set_access))
}
