//! System health and status handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::state::AppState;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "ok")]
    pub status: String,
    /// Whether the database connection has been established
    #[schema(example = true)]
    pub database: bool,
}

/// Health check endpoint
///
/// Reports liveness together with database readiness. The endpoint itself
/// always answers 200; `database: false` means the todo routes are still
/// answering 503.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        database: state.db().is_ready(),
    })
}
