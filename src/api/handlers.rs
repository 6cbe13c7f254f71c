//! HTTP request handlers.
//!
//! Every handler behind the gate reads its caller identity from request
//! extensions; the gate guarantees it is present and verified.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::api::types::{Envelope, HealthResponse, ProfileData, TodoPayload};
use crate::auth::AuthUser;
use crate::domain::Todo;
use crate::error::ApiResult;
use crate::AppState;

/// Get the authenticated caller's profile.
///
/// GET /profile
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile from the verified token"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "profile"
)]
pub async fn get_profile(
    Extension(user): Extension<AuthUser>,
) -> Json<Envelope<ProfileData>> {
    Json(Envelope::new(
        "Profile retrieved successfully",
        ProfileData {
            username: user.username,
            email: user.email,
        },
    ))
}

/// Create a new todo authored by the caller.
///
/// POST /todo
#[utoipa::path(
    post,
    path = "/todo",
    request_body = TodoPayload,
    responses(
        (status = 200, description = "Todo created"),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<TodoPayload>,
) -> ApiResult<Json<Envelope<Todo>>> {
    let (title, content, status, deadline) = payload.into_fields()?;

    let todo = Todo::new(title, content, status, deadline, user.id);
    state.repository.create_todo(&todo).await?;

    tracing::info!(todo_id = %todo.id, author = %todo.author, "Todo created");

    Ok(Json(Envelope::new("Todo created successfully", todo)))
}

/// List all todos, newest first.
///
/// GET /todos
#[utoipa::path(
    get,
    path = "/todos",
    responses(
        (status = 200, description = "All todos, newest first"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Envelope<Vec<Todo>>>> {
    let todos = state.repository.list_todos().await?;

    Ok(Json(Envelope::new("Todos retrieved successfully", todos)))
}

/// Get a specific todo by ID.
///
/// GET /todo/{id}
#[utoipa::path(
    get,
    path = "/todo/{id}",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "The todo"),
        (status = 404, description = "Todo not found"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<Todo>>> {
    let todo = state.repository.get_todo(id).await?;

    Ok(Json(Envelope::new("Todo retrieved successfully", todo)))
}

/// Replace a todo's fields.
///
/// PUT /todo/{id}
#[utoipa::path(
    put,
    path = "/todo/{id}",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    request_body = TodoPayload,
    responses(
        (status = 200, description = "Updated todo"),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "Todo not found"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TodoPayload>,
) -> ApiResult<Json<Envelope<Todo>>> {
    let (title, content, status, deadline) = payload.into_fields()?;

    let todo = state
        .repository
        .update_todo(id, &title, &content, &status, deadline)
        .await?;

    Ok(Json(Envelope::new("Todo updated successfully", todo)))
}

/// Delete a todo by ID.
///
/// DELETE /todo/{id}
#[utoipa::path(
    delete,
    path = "/todo/{id}",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Deleted todo"),
        (status = 404, description = "Todo not found"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<Todo>>> {
    let todo = state.repository.delete_todo(id).await?;

    tracing::info!(todo_id = %todo.id, "Todo deleted");

    Ok(Json(Envelope::new("Todo deleted successfully", todo)))
}

/// Health check.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
