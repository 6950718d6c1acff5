//! Correlation echo endpoint.
//!
//! Reports the request id from the context record, the inbound header and a
//! spawned background task, so operators can check propagation end to end.

use axum::{Extension, Json, Router, http::HeaderMap, routing::any};

use crate::api::dto::RequestIdResponse;
use crate::api::middleware::RequestId;
use crate::context::context;
use crate::error::AppResult;
use crate::request_id::{REQUEST_ID_HEADER, id_from_header};
use crate::state::AppState;

/// # Routes
/// - `ANY /request-id` - Echo the correlation id as seen by the handler
pub fn correlation_routes() -> Router<AppState> {
    Router::new().route("/request-id", any(request_id_echo))
}

pub async fn request_id_echo(
    Extension(RequestId(extension_id)): Extension<RequestId>,
    headers: HeaderMap,
) -> AppResult<Json<RequestIdResponse>> {
    tokio::task::yield_now().await;

    let background_request_id = context()
        .spawn(async { context().request_id() })
        .await?;

    let request_id = context().request_id();
    tracing::debug!(
        extension_id = %extension_id,
        matches = request_id.as_deref() == Some(extension_id.as_str()),
        "Echoing request id"
    );

    Ok(Json(RequestIdResponse {
        request_id,
        req_request_id: headers.get(REQUEST_ID_HEADER).map(id_from_header),
        background_request_id,
    }))
}
