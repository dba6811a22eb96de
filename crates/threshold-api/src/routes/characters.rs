//! Routes for the Character bounded context.

use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use threshold_character::application::query_handlers::{self, CharacterView};
use threshold_character::application::command_handlers;
use threshold_character::domain::commands;
use threshold_character::domain::posture::Posture;

use crate::error::ApiError;
use crate::routes::CommandResponse;
use crate::state::AppState;
use crate::world::Mailbox;

/// Request body for POST /create.
#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequest {
    /// The actor id the character belongs to.
    pub character_id: Uuid,
    /// The character's name.
    pub name: String,
}

/// Request body for POST /change-posture.
#[derive(Debug, Deserialize)]
pub struct ChangePostureRequest {
    /// The character to move.
    pub character_id: Uuid,
    /// The posture to take.
    pub posture: Posture,
}

/// POST /create
#[instrument(skip(state, request), fields(character_id = %request.character_id))]
async fn create_character(
    State(state): State<AppState>,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::CreateCharacter {
        correlation_id: Uuid::new_v4(),
        character_id: request.character_id,
        name: request.name,
    };

    let result = command_handlers::handle_create_character(
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

/// POST /change-posture
#[instrument(skip(state, request), fields(character_id = %request.character_id))]
async fn change_posture(
    State(state): State<AppState>,
    Json(request): Json<ChangePostureRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::ChangePosture {
        correlation_id: Uuid::new_v4(),
        character_id: request.character_id,
        posture: request.posture,
    };
    let mailbox = Mailbox::new();

    let result = command_handlers::handle_change_posture(
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
async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CharacterView>, ApiError> {
    let view = query_handlers::get_character_by_id(id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// Returns the router for the character context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_character))
        .route("/change-posture", post(change_posture))
        .route("/{id}", get(get_character))
}
