//! HTTP REST API routes
//!
//! One module per entity. DTOs live next to their handlers; every handler
//! returns `Result<Json<..>, (StatusCode, String)>` and errors funnel
//! through `error_response`, which owns the code-to-status mapping in one
//! place.

mod character_routes;
mod encounter_routes;
mod event_routes;
mod monster_routes;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Router,
};

use fray_engine_app::application::services::ErrorCode;

use crate::infrastructure::state::AppState;

/// Map a service error onto an HTTP response.
pub(crate) fn error_response<E: ErrorCode>(err: E) -> (StatusCode, String) {
    let status = match err.code() {
        "FORBIDDEN" => StatusCode::FORBIDDEN,
        "ENCOUNTER_NOT_FOUND" | "CHARACTER_NOT_FOUND" | "TEMPLATE_NOT_FOUND" => {
            StatusCode::NOT_FOUND
        }
        "OWNER_REQUIRED" | "VALIDATION" => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

/// Parse a path segment as a uuid, rejecting with 400 on garbage.
pub(crate) fn parse_uuid(raw: &str, what: &str) -> Result<uuid::Uuid, (StatusCode, String)> {
    uuid::Uuid::parse_str(raw).map_err(|_| (StatusCode::BAD_REQUEST, format!("Invalid {what} ID")))
}

async fn health() -> &'static str {
    "ok"
}

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        // Encounters
        .route("/api/encounters", get(encounter_routes::list_encounters))
        .route(
            "/api/encounters/mine",
            get(encounter_routes::list_my_encounters),
        )
        .route("/api/encounters", post(encounter_routes::create_encounter))
        .route(
            "/api/encounters/{id}",
            delete(encounter_routes::delete_encounter),
        )
        // Monsters
        .route(
            "/api/monsters/templates",
            get(monster_routes::list_templates),
        )
        .route(
            "/api/monsters/templates",
            post(monster_routes::create_template),
        )
        .route(
            "/api/encounters/{id}/monsters",
            get(monster_routes::list_encounter_monsters),
        )
        .route(
            "/api/encounters/{id}/monsters",
            post(monster_routes::spawn_monster),
        )
        .route("/api/monsters/{id}", delete(monster_routes::delete_monster))
        // Characters
        .route("/api/characters", get(character_routes::list_characters))
        .route(
            "/api/characters/available",
            get(character_routes::list_available_characters),
        )
        .route(
            "/api/characters/mine",
            get(character_routes::list_my_characters),
        )
        .route("/api/characters", post(character_routes::create_character))
        .route(
            "/api/encounters/{id}/characters",
            get(character_routes::list_encounter_characters),
        )
        .route(
            "/api/encounters/{id}/characters/{character_id}",
            put(character_routes::link_character),
        )
        .route(
            "/api/encounters/{id}/characters/{character_id}",
            delete(character_routes::unlink_character),
        )
        .route(
            "/api/characters/{id}",
            delete(character_routes::delete_character),
        )
        // Event log
        .route(
            "/api/encounters/{id}/events",
            get(event_routes::list_encounter_events),
        )
        .route("/api/events/{id}", delete(event_routes::delete_event))
}
