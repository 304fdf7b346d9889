//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::state::AppState;
use super::system::{self, HealthResponse};
use super::todos::{
    self, CreateTodoRequest, DeleteResponse, ErrorResponse, TodoResponse, UpdateTodoRequest,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todos API",
        version = "0.1.0",
        description = "Minimal todo collection API",
        license(name = "MIT")
    ),
    paths(
        system::health,
        todos::list_todos,
        todos::create_todo,
        todos::update_todo,
        todos::delete_todo,
    ),
    components(
        schemas(
            HealthResponse,
            TodoResponse,
            CreateTodoRequest,
            UpdateTodoRequest,
            DeleteResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "todos", description = "Todo collection endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation.
///
/// CORS is wide open: any origin may call any route. The service is meant
/// to sit behind a browser frontend served from elsewhere.
pub fn create_router(state: AppState) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = Router::new().route("/health", get(system::health));

    let todo_routes = Router::new()
        .route("/api/todos", get(todos::list_todos))
        .route("/api/todos", post(todos::create_todo))
        .route("/api/todos/{id}", put(todos::update_todo))
        .route("/api/todos/{id}", delete(todos::delete_todo));

    system_routes
        .merge(todo_routes)
        .merge(Scalar::with_url("/docs", api))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
