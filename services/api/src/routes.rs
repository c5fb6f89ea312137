//! API service routes

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tracing::error;

use crate::state::AppState;

pub mod images;
pub mod objects;
pub mod sessions;
pub mod tags;
pub mod tokens;
pub mod users;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(users::router(state.clone()))
        .merge(tokens::router(state.clone()))
        .merge(sessions::router())
        .merge(images::router(state.clone()))
        .merge(tags::router())
        .merge(objects::router())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = common::database::health_check(&state.db_pool)
        .await
        .inspect_err(|e| error!("Database health check failed: {}", e))
        .unwrap_or(false);

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if healthy { "ok" } else { "degraded" },
            "service": "burren-api"
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Image, Session, Tag, Token, User},
        repositories::test_support::{memory_pool, seed_tag, seed_user},
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, Response, header},
    };
    use chrono::Duration;
    use common::clock::ManualClock;
    use serde::de::DeserializeOwned;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        pool: sqlx::SqlitePool,
        clock: Arc<ManualClock>,
    }

    impl TestApp {
        async fn new() -> Self {
            let pool = memory_pool().await;
            let clock = Arc::new(ManualClock::default());
            let state = AppState::with_clock(pool.clone(), clock.clone());
            Self {
                router: create_router(state),
                pool,
                clock,
            }
        }

        async fn send(&self, request: Request<Body>) -> Response<Body> {
            self.router.clone().oneshot(request).await.unwrap()
        }

        async fn get(&self, uri: &str, bearer: Option<&str>) -> Response<Body> {
            let mut builder = Request::builder().uri(uri);
            if let Some(token) = bearer {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            self.send(builder.body(Body::empty()).unwrap()).await
        }

        async fn post(&self, uri: &str, body: Value, bearer: Option<&str>) -> Response<Body> {
            let mut builder = Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json");
            if let Some(token) = bearer {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            self.send(builder.body(Body::from(body.to_string())).unwrap())
                .await
        }

        async fn delete(&self, uri: &str, bearer: &str) -> Response<Body> {
            let request = Request::builder()
                .method("DELETE")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
                .body(Body::empty())
                .unwrap();
            self.send(request).await
        }

        async fn signup_and_login(&self, name: &str) -> (User, Token) {
            let response = self
                .post(
                    "/users/",
                    json!({
                        "name": name,
                        "fullname": "Test Person",
                        "email": format!("{}@example.com", name),
                        "password": "Analytical#1"
                    }),
                    None,
                )
                .await;
            assert_eq!(response.status(), StatusCode::CREATED);
            let user: User = read_json(response).await;

            let response = self
                .post(
                    "/login",
                    json!({ "username": name, "password": "Analytical#1" }),
                    None,
                )
                .await;
            assert_eq!(response.status(), StatusCode::CREATED);
            let token: Token = read_json(response).await;

            (user, token)
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = TestApp::new().await;

        let response = app.get("/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = read_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_session_with_unknown_owner_is_not_found() {
        let app = TestApp::new().await;

        let response = app
            .post(
                "/sessions/",
                json!({ "name": "orphan", "owner_id": "nobody" }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: Value = read_json(response).await;
        assert_eq!(body["error"], "Owner not found");
    }

    #[tokio::test]
    async fn test_session_create_get_and_list() {
        let app = TestApp::new().await;
        let (owner, member) = {
            let mut conn = app.pool.acquire().await.unwrap();
            seed_tag(&mut conn, "charcoal").await;
            (
                seed_user(&mut conn, "owner").await,
                seed_user(&mut conn, "member").await,
            )
        };

        // The owner may be referenced by name; it is stored by id
        let response = app
            .post(
                "/sessions/",
                json!({
                    "name": "life drawing",
                    "owner_id": owner.name,
                    "members": [member.email, "ghost"],
                    "tags": ["charcoal", "oil"]
                }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Session = read_json(response).await;
        assert_eq!(created.owner_id, owner.id);
        assert_eq!(created.members.len(), 2);
        assert_eq!(created.tags.len(), 1);

        let response = app.get(&format!("/sessions/{}", created.id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: Session = read_json(response).await;
        assert_eq!(fetched, created);

        let response = app.get("/sessions/?skip=0&limit=10", None).await;
        let listed: Vec<Session> = read_json(response).await;
        assert_eq!(listed, vec![created]);

        let response = app.get("/sessions/missing", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_signup_login_and_me() {
        let app = TestApp::new().await;
        let (user, token) = app.signup_and_login("ada").await;
        assert_eq!(token.user_id, user.id);

        let response = app.get("/users/me", Some(&token.id)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = read_json(response).await;
        assert_eq!(body["id"], user.id.as_str());
        assert!(body.get("hashed_password").is_none());

        let response = app.get("/users/ada@example.com", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.get("/users/me", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app.get("/users/me", Some("bogus")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_and_duplicate_users() {
        let app = TestApp::new().await;
        app.signup_and_login("ada").await;

        let response = app
            .post(
                "/users/",
                json!({ "name": "ada", "email": "other@example.com", "password": "Analytical#1" }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .post(
                "/users/",
                json!({ "name": "grace", "email": "grace@example.com", "password": "weak" }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let app = TestApp::new().await;
        app.signup_and_login("ada").await;

        let response = app
            .post(
                "/login",
                json!({ "username": "ada", "password": "Wrong#pass1" }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_reported_distinctly() {
        let app = TestApp::new().await;
        let (_, token) = app.signup_and_login("ada").await;

        app.clock.advance(Duration::minutes(20));
        let response = app.get("/users/me", Some(&token.id)).await;
        assert_eq!(response.status(), StatusCode::OK);

        // Still alive: the previous request slid the window
        app.clock.advance(Duration::minutes(20));
        let response = app.get("/users/me", Some(&token.id)).await;
        assert_eq!(response.status(), StatusCode::OK);

        app.clock.advance(Duration::minutes(31));
        let response = app.get("/users/me", Some(&token.id)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = read_json(response).await;
        assert_eq!(body["error"], "Token expired");
    }

    #[tokio::test]
    async fn test_token_listing_and_revocation() {
        let app = TestApp::new().await;
        let (_, token) = app.signup_and_login("ada").await;
        let (_, other) = app.signup_and_login("grace").await;

        let response = app.get("/tokens/", Some(&token.id)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let tokens: Vec<Token> = read_json(response).await;
        let ids: Vec<&str> = tokens.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![token.id.as_str()]);

        // Grace cannot revoke Ada's token
        let response = app.delete(&format!("/tokens/{}", token.id), &other.id).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.delete(&format!("/tokens/{}", token.id), &token.id).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.get("/users/me", Some(&token.id)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_image_upload_requires_token_and_sets_owner() {
        let app = TestApp::new().await;
        let (user, token) = app.signup_and_login("ada").await;
        let payload = json!({
            "name": "study.png",
            "image_data": "iVBORw0KGgo=",
            "tags": ["portrait"],
            "model_ids": ["ada"]
        });
        {
            let mut conn = app.pool.acquire().await.unwrap();
            seed_tag(&mut conn, "portrait").await;
        }

        let response = app.post("/images/", payload.clone(), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app.post("/images/", payload, Some(&token.id)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let image: Image = read_json(response).await;
        assert_eq!(image.owner_id, user.id);
        assert_eq!(image.image, "iVBORw0KGgo=");
        assert_eq!(image.models.len(), 1);
        assert_eq!(image.tags.len(), 1);

        let response = app.get("/images/", None).await;
        let all: Vec<Image> = read_json(response).await;
        assert_eq!(all.len(), 1);

        let response = app.get("/images/?owner=someone-else", None).await;
        let none: Vec<Image> = read_json(response).await;
        assert!(none.is_empty());

        let response = app.get(&format!("/images/{}", image.id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_duplicate_tag_is_a_conflict() {
        let app = TestApp::new().await;

        let response = app.post("/tags/", json!({ "name": "portrait" }), None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let tag: Tag = read_json(response).await;
        assert_eq!(tag.name, "portrait");

        let response = app.post("/tags/", json!({ "name": "portrait" }), None).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app.get("/tags/portrait", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.get("/tags/landscape", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_object_data_round_trip() {
        let app = TestApp::new().await;

        let response = app
            .post(
                "/objects/",
                json!({ "name": "canvas", "data": { "layers": 3 } }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = read_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = app.get(&format!("/objects/{}", id), None).await;
        let fetched: Value = read_json(response).await;
        assert_eq!(fetched, created);

        let response = app.get("/objects/", None).await;
        let listed: Vec<Value> = read_json(response).await;
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_negative_paging_is_rejected() {
        let app = TestApp::new().await;

        for uri in ["/sessions?skip=-1", "/tags?limit=-5", "/users/?skip=-3"] {
            let response = app.get(uri, None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_collections_answer_with_and_without_trailing_slash() {
        let app = TestApp::new().await;

        for uri in [
            "/sessions",
            "/sessions/",
            "/users",
            "/tags",
            "/objects",
            "/objects/",
            "/images?owner=*",
            "/images/",
        ] {
            let response = app.get(uri, None).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);

            let listed: Vec<Value> = read_json(response).await;
            assert!(listed.is_empty(), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_missing_entities_are_not_found() {
        let app = TestApp::new().await;

        for uri in ["/images/missing", "/objects/missing", "/users/nobody"] {
            let response = app.get(uri, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);

            let body: Value = read_json(response).await;
            assert!(body["error"].as_str().unwrap().ends_with("not found"), "{}", uri);
        }
    }
}
