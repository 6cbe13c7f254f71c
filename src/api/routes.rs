//! Route definitions for the API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::auth::{require_auth, TokenVerifier};
use crate::AppState;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_profile,
        handlers::create_todo,
        handlers::list_todos,
        handlers::get_todo,
        handlers::update_todo,
        handlers::delete_todo,
        handlers::health_check,
    ),
    components(schemas(
        crate::api::types::TodoPayload,
        crate::api::types::ProfileData,
        crate::api::types::HealthResponse,
        crate::domain::Todo,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "profile", description = "Authenticated caller profile"),
        (name = "todos", description = "Todo record management"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Taskgate API",
        version = "0.1.0",
        description = "Token-gated todo service",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the API router.
///
/// Everything except `/health` and the docs sits behind the credential
/// gate; an unauthenticated request never reaches a handler.
pub fn build_router(state: AppState, verifier: TokenVerifier) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected_routes = Router::new()
        .route("/profile", get(handlers::get_profile))
        .route("/todo", post(handlers::create_todo))
        .route("/todos", get(handlers::list_todos))
        .route(
            "/todo/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .layer(middleware::from_fn_with_state(verifier, require_auth))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state);

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, Response, StatusCode};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use sqlx::sqlite::SqlitePool;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::{AuthUser, Claims};
    use crate::storage::TodoRepository;

    const SECRET: &str = "routes-test-secret";

    async fn test_app() -> Router {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        let repository = TodoRepository::new(pool);
        repository.init_schema().await.expect("Failed to init schema");

        build_router(AppState { repository }, TokenVerifier::new(SECRET))
    }

    fn mint_token() -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            user: AuthUser {
                id: "u1".to_string(),
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
            },
            iat: now,
            exp: now + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn authed(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let token = mint_token();
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"));

        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn todo_payload(title: &str) -> serde_json::Value {
        serde_json::json!({
            "title": title,
            "content": "some content",
            "status": "pending",
            "deadline": "2030-01-01T00:00:00Z",
        })
    }

    #[tokio::test]
    async fn test_profile_with_valid_token() {
        let app = test_app().await;

        let response = app
            .oneshot(authed(Method::GET, "/profile", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Profile retrieved successfully");
        assert_eq!(body["data"]["username"], "alice");
        assert_eq!(body["data"]["email"], "a@x.com");
    }

    #[tokio::test]
    async fn test_protected_route_without_header() {
        let app = test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/todos").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["message"],
            "No token, authorization denied"
        );
    }

    #[tokio::test]
    async fn test_protected_route_with_garbage_token() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/todos")
                    .header(header::AUTHORIZATION, "Bearer garbage.not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Token is not valid");
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_todo_crud_flow() {
        let app = test_app().await;

        // Create
        let response = app
            .clone()
            .oneshot(authed(Method::POST, "/todo", Some(todo_payload("buy milk"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["message"], "Todo created successfully");
        assert_eq!(created["data"]["author"], "u1");
        let id = created["data"]["id"].as_str().unwrap().to_string();

        // List
        let response = app
            .clone()
            .oneshot(authed(Method::GET, "/todos", None))
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed["message"], "Todos retrieved successfully");
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);

        // Get by id
        let response = app
            .clone()
            .oneshot(authed(Method::GET, &format!("/todo/{id}"), None))
            .await
            .unwrap();
        let fetched = body_json(response).await;
        assert_eq!(fetched["message"], "Todo retrieved successfully");
        assert_eq!(fetched["data"]["title"], "buy milk");

        // Update
        let response = app
            .clone()
            .oneshot(authed(
                Method::PUT,
                &format!("/todo/{id}"),
                Some(todo_payload("buy oat milk")),
            ))
            .await
            .unwrap();
        let updated = body_json(response).await;
        assert_eq!(updated["message"], "Todo updated successfully");
        assert_eq!(updated["data"]["title"], "buy oat milk");

        // Delete
        let response = app
            .clone()
            .oneshot(authed(Method::DELETE, &format!("/todo/{id}"), None))
            .await
            .unwrap();
        let deleted = body_json(response).await;
        assert_eq!(deleted["message"], "Todo deleted successfully");

        // Gone
        let response = app
            .oneshot(authed(Method::GET, &format!("/todo/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Todo not found");
    }

    #[tokio::test]
    async fn test_create_todo_with_missing_fields() {
        let app = test_app().await;

        let response = app
            .oneshot(authed(
                Method::POST,
                "/todo",
                Some(serde_json::json!({"title": "only a title"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "All fields are required"
        );
    }

    #[tokio::test]
    async fn test_update_unknown_todo_is_not_found() {
        let app = test_app().await;

        let response = app
            .oneshot(authed(
                Method::PUT,
                &format!("/todo/{}", uuid::Uuid::new_v4()),
                Some(todo_payload("phantom")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Todo not found");
    }
}
