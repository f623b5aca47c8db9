//! Monster API routes
//!
//! Templates are the monsters with no encounter; spawning stamps one into
//! an encounter. Deletion is deliberately unchecked (see the monster
//! service).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fray_domain::{EncounterId, Monster, MonsterId};

use super::encounter_routes::CreatedResponse;
use super::middleware::Auth;
use super::{error_response, parse_uuid};
use crate::infrastructure::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// Request to create a new monster template
#[derive(Debug, Deserialize)]
pub struct CreateTemplateBody {
    pub name: String,
}

/// Request to spawn a template into an encounter
#[derive(Debug, Deserialize)]
pub struct SpawnMonsterBody {
    pub template_id: Uuid,
}

/// Response DTO for a monster (template or instance)
#[derive(Debug, Serialize)]
pub struct MonsterResponse {
    pub id: String,
    pub name: String,
    pub encounter: Option<String>,
    pub template: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Monster> for MonsterResponse {
    fn from(monster: Monster) -> Self {
        Self {
            id: monster.id.to_string(),
            name: monster.name,
            encounter: monster.encounter.map(|id| id.to_string()),
            template: monster.template.map(|id| id.to_string()),
            created_at: monster.created_at,
        }
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// List all monster templates
///
/// GET /api/monsters/templates (public)
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MonsterResponse>>, (StatusCode, String)> {
    let templates = state
        .monster_service
        .list_templates()
        .await
        .map_err(error_response)?;
    Ok(Json(templates.into_iter().map(Into::into).collect()))
}

/// List monster instances in an encounter
///
/// GET /api/encounters/{id}/monsters
pub async fn list_encounter_monsters(
    State(state): State<Arc<AppState>>,
    Auth(caller): Auth,
    Path(id): Path<String>,
) -> Result<Json<Vec<MonsterResponse>>, (StatusCode, String)> {
    let id = EncounterId::from_uuid(parse_uuid(&id, "encounter")?);
    let monsters = state
        .monster_service
        .list_by_encounter(&caller, id)
        .await
        .map_err(error_response)?;
    Ok(Json(monsters.into_iter().map(Into::into).collect()))
}

/// Create a new monster template
///
/// POST /api/monsters/templates
pub async fn create_template(
    State(state): State<Arc<AppState>>,
    // Any authenticated caller may create a template; the identity is not
    // recorded on it
    Auth(_caller): Auth,
    Json(body): Json<CreateTemplateBody>,
) -> Result<(StatusCode, Json<CreatedResponse>), (StatusCode, String)> {
    let id = state
        .monster_service
        .create_template(body.name)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_string() }),
    ))
}

/// Spawn a template into an encounter
///
/// POST /api/encounters/{id}/monsters
pub async fn spawn_monster(
    State(state): State<Arc<AppState>>,
    Auth(caller): Auth,
    Path(id): Path<String>,
    Json(body): Json<SpawnMonsterBody>,
) -> Result<(StatusCode, Json<CreatedResponse>), (StatusCode, String)> {
    let id = EncounterId::from_uuid(parse_uuid(&id, "encounter")?);

    let monster_id = state
        .monster_service
        .spawn_into_encounter(&caller, id, MonsterId::from_uuid(body.template_id))
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: monster_id.to_string(),
        }),
    ))
}

/// Delete a monster by id
///
/// DELETE /api/monsters/{id}
pub async fn delete_monster(
    State(state): State<Arc<AppState>>,
    Auth(_caller): Auth,
    Path(id): Path<String>,
) -> Result<Json<bool>, (StatusCode, String)> {
    let id = MonsterId::from_uuid(parse_uuid(&id, "monster")?);

    state
        .monster_service
        .delete(id)
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

    use fray_domain::UserId;

    use super::*;
    use crate::infrastructure::http::create_routes;
    use crate::infrastructure::test_support::test_state;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_json(
        app: &axum::Router,
        user: UserId,
        uri: &str,
        body: String,
    ) -> axum::response::Response {
        let request = HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .header("X-User-Id", user.to_string())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn spawn(app: &axum::Router, user: UserId, encounter: &str, template: &str) -> String {
        let response = post_json(
            app,
            user,
            &format!("/api/encounters/{encounter}/monsters"),
            format!(r#"{{"template_id":"{template}"}}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_str().unwrap().to_string()
    }

    async fn monster_names(app: &axum::Router, user: UserId, encounter: &str) -> Vec<String> {
        let request = HttpRequest::builder()
            .uri(format!("/api/encounters/{encounter}/monsters"))
            .header("X-User-Id", user.to_string())
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap().to_string())
            .collect()
    }

    /// The full §8 scenario over the wire: spawn twice, kill "Goblin A",
    /// spawn again, and the table holds two monsters named "Goblin B".
    #[tokio::test]
    async fn goblin_ambush_over_http() {
        let app = create_routes().with_state(test_state(None));
        let dm = UserId::new();

        let response = post_json(
            &app,
            dm,
            "/api/encounters",
            r#"{"name":"Goblin Ambush"}"#.to_string(),
        )
        .await;
        let encounter = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = post_json(
            &app,
            dm,
            "/api/monsters/templates",
            r#"{"name":"Goblin"}"#.to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let template = body_json(response).await["id"].as_str().unwrap().to_string();

        let first = spawn(&app, dm, &encounter, &template).await;
        spawn(&app, dm, &encounter, &template).await;

        let mut names = monster_names(&app, dm, &encounter).await;
        names.sort();
        assert_eq!(names, ["Goblin A", "Goblin B"]);

        let request = HttpRequest::builder()
            .method("DELETE")
            .uri(format!("/api/monsters/{first}"))
            .header("X-User-Id", dm.to_string())
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        spawn(&app, dm, &encounter, &template).await;
        let names = monster_names(&app, dm, &encounter).await;
        assert_eq!(
            names.iter().filter(|n| n.as_str() == "Goblin B").count(),
            2
        );
    }

    #[tokio::test]
    async fn spawning_from_a_missing_template_is_not_found() {
        let app = create_routes().with_state(test_state(None));
        let dm = UserId::new();

        let response = post_json(
            &app,
            dm,
            "/api/encounters",
            r#"{"name":"Goblin Ambush"}"#.to_string(),
        )
        .await;
        let encounter = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = post_json(
            &app,
            dm,
            &format!("/api/encounters/{encounter}/monsters"),
            format!(r#"{{"template_id":"{}"}}"#, Uuid::new_v4()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn spawning_into_a_foreign_encounter_is_forbidden() {
        let app = create_routes().with_state(test_state(None));
        let dm = UserId::new();

        let response = post_json(
            &app,
            dm,
            "/api/encounters",
            r#"{"name":"Goblin Ambush"}"#.to_string(),
        )
        .await;
        let encounter = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = post_json(
            &app,
            UserId::new(),
            &format!("/api/encounters/{encounter}/monsters"),
            format!(r#"{{"template_id":"{}"}}"#, Uuid::new_v4()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn deleting_an_absent_monster_succeeds() {
        let app = create_routes().with_state(test_state(None));
        let request = HttpRequest::builder()
            .method("DELETE")
            .uri(format!("/api/monsters/{}", Uuid::new_v4()))
            .header("X-User-Id", UserId::new().to_string())
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!(true));
    }

    #[tokio::test]
    async fn templates_do_not_show_up_as_encounter_members() {
        let app = create_routes().with_state(test_state(None));
        let dm = UserId::new();

        let response = post_json(
            &app,
            dm,
            "/api/monsters/templates",
            r#"{"name":"Goblin"}"#.to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = HttpRequest::builder()
            .uri("/api/monsters/templates")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let templates = body_json(response).await;
        assert_eq!(templates[0]["name"], "Goblin");
        assert!(templates[0]["encounter"].is_null());
        assert!(templates[0]["template"].is_null());
    }
}
