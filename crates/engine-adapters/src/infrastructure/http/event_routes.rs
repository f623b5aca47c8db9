//! Event log API routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use fray_domain::{EncounterEvent, EncounterId, EventId};

use super::middleware::Auth;
use super::{error_response, parse_uuid};
use crate::infrastructure::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// Response DTO for an event log entry
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub encounter: String,
    pub event_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<EncounterEvent> for EventResponse {
    fn from(event: EncounterEvent) -> Self {
        Self {
            id: event.id.to_string(),
            encounter: event.encounter.to_string(),
            event_type: event.event_type.as_str().to_string(),
            created_at: event.created_at,
        }
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// List the live log entries of an encounter
///
/// GET /api/encounters/{id}/events
pub async fn list_encounter_events(
    State(state): State<Arc<AppState>>,
    Auth(caller): Auth,
    Path(id): Path<String>,
) -> Result<Json<Vec<EventResponse>>, (StatusCode, String)> {
    let id = EncounterId::from_uuid(parse_uuid(&id, "encounter")?);
    let events = state
        .event_service
        .list_by_encounter(&caller, id)
        .await
        .map_err(error_response)?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// Soft-delete a log entry
///
/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Auth(_caller): Auth,
    Path(id): Path<String>,
) -> Result<Json<bool>, (StatusCode, String)> {
    let id = EventId::from_uuid(parse_uuid(&id, "event")?);

    state
        .event_service
        .soft_delete(id)
        .await
        .map_err(error_response)?;

    Ok(Json(true))
}
