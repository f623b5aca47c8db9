//! Character API routes

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fray_domain::{Character, CharacterId, EncounterId, UserId};
use fray_engine_app::application::services::CreateCharacterRequest;

use super::encounter_routes::CreatedResponse;
use super::middleware::Auth;
use super::{error_response, parse_uuid};
use crate::infrastructure::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// Request to create a new character
#[derive(Debug, Deserialize)]
pub struct CreateCharacterBody {
    pub name: String,
    /// Owner on whose behalf a privileged caller creates the character
    pub owner_id: Option<Uuid>,
}

/// Query parameters for the by-owner listing
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    /// Owner to list for, required under the service credential
    pub owner_id: Option<Uuid>,
}

/// Response DTO for a character
#[derive(Debug, Serialize)]
pub struct CharacterResponse {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub encounter: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Character> for CharacterResponse {
    fn from(character: Character) -> Self {
        Self {
            id: character.id.to_string(),
            name: character.name,
            owner: character.owner.to_string(),
            encounter: character.encounter.map(|id| id.to_string()),
            created_at: character.created_at,
        }
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// List all characters
///
/// GET /api/characters (public)
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CharacterResponse>>, (StatusCode, String)> {
    let characters = state
        .character_service
        .list_all()
        .await
        .map_err(error_response)?;
    Ok(Json(characters.into_iter().map(Into::into).collect()))
}

/// List characters not currently in any encounter
///
/// GET /api/characters/available (public)
pub async fn list_available_characters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CharacterResponse>>, (StatusCode, String)> {
    let characters = state
        .character_service
        .list_available()
        .await
        .map_err(error_response)?;
    Ok(Json(characters.into_iter().map(Into::into).collect()))
}

/// List the caller's characters, or the named owner's for the service
/// credential
///
/// GET /api/characters/mine?owner_id=...
pub async fn list_my_characters(
    State(state): State<Arc<AppState>>,
    Auth(caller): Auth,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<CharacterResponse>>, (StatusCode, String)> {
    let characters = state
        .character_service
        .list_by_owner(&caller, query.owner_id.map(UserId::from_uuid))
        .await
        .map_err(error_response)?;
    Ok(Json(characters.into_iter().map(Into::into).collect()))
}

/// List member characters of an encounter
///
/// GET /api/encounters/{id}/characters (public)
pub async fn list_encounter_characters(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CharacterResponse>>, (StatusCode, String)> {
    let id = EncounterId::from_uuid(parse_uuid(&id, "encounter")?);
    let characters = state
        .character_service
        .list_by_encounter(id)
        .await
        .map_err(error_response)?;
    Ok(Json(characters.into_iter().map(Into::into).collect()))
}

/// Create a new character
///
/// POST /api/characters
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    Auth(caller): Auth,
    Json(body): Json<CreateCharacterBody>,
) -> Result<(StatusCode, Json<CreatedResponse>), (StatusCode, String)> {
    let id = state
        .character_service
        .create(
            &caller,
            CreateCharacterRequest {
                name: body.name,
                owner: body.owner_id.map(UserId::from_uuid),
            },
        )
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_string() }),
    ))
}

/// Put a character into an encounter
///
/// PUT /api/encounters/{id}/characters/{character_id}
pub async fn link_character(
    State(state): State<Arc<AppState>>,
    Auth(_caller): Auth,
    Path((id, character_id)): Path<(String, String)>,
) -> Result<Json<bool>, (StatusCode, String)> {
    let id = EncounterId::from_uuid(parse_uuid(&id, "encounter")?);
    let character_id = CharacterId::from_uuid(parse_uuid(&character_id, "character")?);

    state
        .character_service
        .link_to_encounter(id, character_id)
        .await
        .map_err(error_response)?;

    Ok(Json(true))
}

/// Take a character out of an encounter
///
/// DELETE /api/encounters/{id}/characters/{character_id}
pub async fn unlink_character(
    State(state): State<Arc<AppState>>,
    Auth(_caller): Auth,
    Path((id, character_id)): Path<(String, String)>,
) -> Result<Json<bool>, (StatusCode, String)> {
    let id = EncounterId::from_uuid(parse_uuid(&id, "encounter")?);
    let character_id = CharacterId::from_uuid(parse_uuid(&character_id, "character")?);

    state
        .character_service
        .unlink_from_encounter(id, character_id)
        .await
        .map_err(error_response)?;

    Ok(Json(true))
}

/// Delete a character the caller owns
///
/// DELETE /api/characters/{id}
pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    Auth(caller): Auth,
    Path(id): Path<String>,
) -> Result<Json<bool>, (StatusCode, String)> {
    let id = CharacterId::from_uuid(parse_uuid(&id, "character")?);

    state
        .character_service
        .delete(&caller, id)
        .await
        .map_err(error_response)?;

    Ok(Json(true))
}
