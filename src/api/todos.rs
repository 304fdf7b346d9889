//! Todo collection handlers.
//!
//! One handler per route, each performing a single database operation.
//! Requests that arrive before the database connection is established are
//! answered with 503 rather than queued.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::state::AppState;
use crate::db::{DbError, Todo};

// =============================================================================
// DTOs
// =============================================================================

/// Error response body shared by every failing route.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Todo not found: id '8nkk6uj4yprt39zrtmhz'")]
    pub error: String,
}

#[derive(Serialize, ToSchema)]
pub struct TodoResponse {
    #[schema(example = "8nkk6uj4yprt39zrtmhz")]
    pub id: String,
    #[schema(example = "buy milk")]
    pub text: String,
    #[schema(example = false)]
    pub completed: bool,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            text: t.text,
            completed: t.completed,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    /// Text of the new todo; stored verbatim, including empty strings.
    #[schema(example = "buy milk")]
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    /// New value for the completion flag. The text cannot be changed here.
    #[schema(example = true)]
    pub completed: bool,
}

/// Acknowledgement returned by the delete route.
#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Todo deleted")]
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "todos",
    responses(
        (status = 200, description = "Every todo in the collection", body = [TodoResponse]),
        (status = 503, description = "Database connection not established", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<Vec<TodoResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let todos = state.db().list_todos().await.map_err(|e| match e {
        DbError::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
    })?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 200, description = "Todo created", body = TodoResponse),
        (status = 422, description = "Request body is missing a string `text` field"),
        (status = 503, description = "Database connection not established", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<Json<TodoResponse>, (StatusCode, Json<ErrorResponse>)> {
    let todo = state.db().create_todo(req.text).await.map_err(|e| match e {
        DbError::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
    })?;

    Ok(Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = TodoResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 422, description = "Request body is missing a boolean `completed` field"),
        (status = 503, description = "Database connection not established", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, (StatusCode, Json<ErrorResponse>)> {
    let todo = state
        .db()
        .set_completed(&id, req.completed)
        .await
        .map_err(|e| match e {
            DbError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Todo '{}' not found", id),
                }),
            ),
            DbError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ),
        })?;

    Ok(Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Deletion acknowledged, whether or not the id existed", body = DeleteResponse),
        (status = 503, description = "Database connection not established", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, (StatusCode, Json<ErrorResponse>)> {
    let deleted = state.db().delete_todo(&id).await.map_err(|e| match e {
        DbError::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
    })?;

    if deleted.is_none() {
        tracing::debug!("no todo with this id; acknowledging anyway");
    }

    Ok(Json(DeleteResponse {
        message: "Todo deleted".to_string(),
    }))
}
