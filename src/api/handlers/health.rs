//! Health check endpoint handlers.

use axum::{Json, Router, extract::State, routing::get};

use crate::api::dto::{HealthResponse, HealthStatus};
use crate::context::context;
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Liveness with context store counters
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        name: state.application.name.clone(),
        version: state.application.version.clone(),
        timestamp: jiff::Timestamp::now().to_string(),
        scopes: context().stats(),
    })
}
