//! Authentication extractor for HTTP routes
//!
//! Resolves the request's credential headers into the `Caller` capability
//! before any handler logic runs:
//!
//! - `X-Service-Key` matching the configured secret -> `Caller::Privileged`
//! - `X-User-Id` carrying a user uuid -> `Caller::EndUser`
//! - neither (or a bad key / unparseable id) -> 401
//!
//! Handlers that serve public reads simply do not use the extractor.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn handler(Auth(caller): Auth) -> impl IntoResponse {
//!     format!("privileged: {}", caller.is_privileged())
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

use fray_domain::UserId;
use fray_engine_ports::inbound::Caller;

use crate::infrastructure::state::AppState;

/// Extractor for the resolved caller capability in handlers
#[derive(Debug, Clone)]
pub struct Auth(pub Caller);

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

fn unauthenticated(msg: &str) -> (StatusCode, String) {
    (StatusCode::UNAUTHORIZED, msg.to_string())
}

impl FromRequestParts<Arc<AppState>> for Auth {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // The service credential wins when both headers are present; a
        // wrong key is rejected rather than downgraded to the user header.
        if let Some(key) = header(parts, "X-Service-Key") {
            return match &state.config.service_api_key {
                Some(expected) if expected == key => Ok(Auth(Caller::Privileged)),
                _ => Err(unauthenticated("Invalid service credential")),
            };
        }

        if let Some(raw) = header(parts, "X-User-Id") {
            let uuid = Uuid::parse_str(raw)
                .map_err(|_| unauthenticated("X-User-Id is not a valid user id"))?;
            return Ok(Auth(Caller::EndUser(UserId::from_uuid(uuid))));
        }

        Err(unauthenticated("No session and no service credential"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, routing::get, Router};
    use tower::ServiceExt;

    use crate::infrastructure::test_support::test_state;

    async fn whoami(Auth(caller): Auth) -> String {
        match caller {
            Caller::Privileged => "service".to_string(),
            Caller::EndUser(id) => format!("user:{id}"),
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(whoami))
            .with_state(test_state(Some("sekrit")))
    }

    #[tokio::test]
    async fn user_header_resolves_to_an_end_user() {
        let user = UserId::new();
        let request = HttpRequest::builder()
            .uri("/")
            .header("X-User-Id", user.to_string())
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, format!("user:{user}").as_bytes());
    }

    #[tokio::test]
    async fn service_key_resolves_to_the_privileged_caller() {
        let request = HttpRequest::builder()
            .uri("/")
            .header("X-Service-Key", "sekrit")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"service");
    }

    #[tokio::test]
    async fn a_wrong_service_key_is_rejected() {
        let request = HttpRequest::builder()
            .uri("/")
            .header("X-Service-Key", "guess")
            // The user header must not rescue a bad service credential
            .header("X-User-Id", UserId::new().to_string())
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn a_service_key_is_rejected_when_none_is_configured() {
        let app = Router::new()
            .route("/", get(whoami))
            .with_state(test_state(None));
        let request = HttpRequest::builder()
            .uri("/")
            .header("X-Service-Key", "sekrit")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn bare_requests_are_unauthenticated() {
        let request = HttpRequest::builder().uri("/").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn a_malformed_user_id_is_rejected() {
        let request = HttpRequest::builder()
            .uri("/")
            .header("X-User-Id", "not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
