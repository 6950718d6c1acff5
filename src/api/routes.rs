//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{
    Router,
    http::{HeaderName, StatusCode},
    middleware,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::request_id::REQUEST_ID_HEADER;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID - assigns the id and opens the context scope
/// 2. CORS - lets browsers read `x-request-id`
/// 3. Logging - request/response lines tagged with the id
/// 4. Timeout - 408 after `server.request_timeout`
///
/// The fallback sits behind the same stack, so unmatched paths are
/// correlated too.
///
/// # Routes
/// - `GET /health` - Liveness and scope counters
/// - `ANY /api/request-id` - Correlation echo
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new().merge(handlers::correlation::correlation_routes());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]);

    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.request_timeout,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .layer(middleware::from_fn_with_state(
            state.generator.clone(),
            request_id_middleware,
        ))
        .with_state(state)
}
