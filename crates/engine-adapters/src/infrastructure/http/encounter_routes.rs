//! Encounter API routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fray_domain::{Encounter, EncounterId, UserId};
use fray_engine_app::application::services::CreateEncounterRequest;

use super::middleware::Auth;
use super::{error_response, parse_uuid};
use crate::infrastructure::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// Request to create a new encounter
#[derive(Debug, Deserialize)]
pub struct CreateEncounterBody {
    pub name: String,
    /// Owner on whose behalf a privileged caller creates the encounter
    pub owner_id: Option<Uuid>,
}

/// Response DTO for an encounter
#[derive(Debug, Serialize)]
pub struct EncounterResponse {
    pub id: String,
    pub name: String,
    pub dungeon_master: String,
    pub created_at: DateTime<Utc>,
}

impl From<Encounter> for EncounterResponse {
    fn from(encounter: Encounter) -> Self {
        Self {
            id: encounter.id.to_string(),
            name: encounter.name,
            dungeon_master: encounter.dungeon_master.to_string(),
            created_at: encounter.created_at,
        }
    }
}

/// Response DTO carrying a freshly created id
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// List all encounters
///
/// GET /api/encounters (public)
pub async fn list_encounters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EncounterResponse>>, (StatusCode, String)> {
    let encounters = state
        .encounter_service
        .list()
        .await
        .map_err(error_response)?;
    Ok(Json(encounters.into_iter().map(Into::into).collect()))
}

/// List the caller's encounters (all of them for the service credential)
///
/// GET /api/encounters/mine
pub async fn list_my_encounters(
    State(state): State<Arc<AppState>>,
    Auth(caller): Auth,
) -> Result<Json<Vec<EncounterResponse>>, (StatusCode, String)> {
    let encounters = state
        .encounter_service
        .list_by_owner(&caller)
        .await
        .map_err(error_response)?;
    Ok(Json(encounters.into_iter().map(Into::into).collect()))
}

/// Create a new encounter
///
/// POST /api/encounters
pub async fn create_encounter(
    State(state): State<Arc<AppState>>,
    Auth(caller): Auth,
    Json(body): Json<CreateEncounterBody>,
) -> Result<(StatusCode, Json<CreatedResponse>), (StatusCode, String)> {
    let id = state
        .encounter_service
        .create(
            &caller,
            CreateEncounterRequest {
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

/// Delete an encounter, cascading over members and log entries
///
/// DELETE /api/encounters/{id}
pub async fn delete_encounter(
    State(state): State<Arc<AppState>>,
    Auth(caller): Auth,
    Path(id): Path<String>,
) -> Result<Json<bool>, (StatusCode, String)> {
    let id = EncounterId::from_uuid(parse_uuid(&id, "encounter")?);

    state
        .encounter_service
        .delete(&caller, id)
        .await
        .map_err(error_response)?;

    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request as HttpRequest},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::http::create_routes;
    use crate::infrastructure::test_support::test_state;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_then_list_round_trips_over_http() {
        let state = test_state(None);
        let app = create_routes().with_state(state);
        let dm = UserId::new();

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/encounters")
            .header("X-User-Id", dm.to_string())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Goblin Ambush"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert!(created["id"].is_string());

        // The list endpoint is public: no credential needed
        let request = HttpRequest::builder()
            .uri("/api/encounters")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed[0]["name"], "Goblin Ambush");
        assert_eq!(listed[0]["dungeon_master"], dm.to_string());
    }

    #[tokio::test]
    async fn create_without_a_credential_is_unauthorized() {
        let app = create_routes().with_state(test_state(None));
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/encounters")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Goblin Ambush"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn a_stranger_cannot_delete_a_foreign_encounter() {
        let state = test_state(Some("sekrit"));
        let app = create_routes().with_state(state);
        let dm = UserId::new();

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/encounters")
            .header("X-User-Id", dm.to_string())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Goblin Ambush"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        let request = HttpRequest::builder()
            .method("DELETE")
            .uri(format!("/api/encounters/{id}"))
            .header("X-User-Id", UserId::new().to_string())
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // The service credential succeeds on the same encounter
        let request = HttpRequest::builder()
            .method("DELETE")
            .uri(format!("/api/encounters/{id}"))
            .header("X-Service-Key", "sekrit")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn privileged_create_requires_an_explicit_owner() {
        let app = create_routes().with_state(test_state(Some("sekrit")));
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/encounters")
            .header("X-Service-Key", "sekrit")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Goblin Ambush"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_with_a_garbage_id_is_a_bad_request() {
        let app = create_routes().with_state(test_state(None));
        let request = HttpRequest::builder()
            .method("DELETE")
            .uri("/api/encounters/not-a-uuid")
            .header("X-User-Id", UserId::new().to_string())
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
