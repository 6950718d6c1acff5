//! Request ID middleware for request tracing.
//!
//! Every request gets a correlation id: the inbound `x-request-id` header
//! when it carries one, otherwise a freshly generated value. The rest of the
//! pipeline runs inside a context scope holding that id, and the response
//! always echoes it back.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::context::{ContextRecord, context};
use crate::error::AppError;
use crate::request_id::{GenerateError, REQUEST_ID_HEADER, SharedGenerator, id_from_header};

/// Request ID stored in request extensions for downstream access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Middleware that binds a correlation id to the request.
///
/// # Behavior
/// - A non-empty `x-request-id` header is used as is and echoed byte for
///   byte; obs-text bytes reach the record as Latin-1 characters
/// - Otherwise the generator is called exactly once and its value is written
///   onto the inbound headers
/// - The id is stored in request extensions and in a fresh context record
/// - Downstream middleware and the handler run inside that record's scope
/// - The response carries the id in `x-request-id`, errors included
///
/// A generator failure short-circuits with a 500 before any handler runs.
pub async fn request_id_middleware(
    State(generator): State<SharedGenerator>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (request_id, header_value) = match inbound_request_id(request.headers()) {
        Some(found) => found,
        None => {
            let id = generator.generate()?;
            let value = to_header_value(&id)?;
            request
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value.clone());
            (id, value)
        }
    };

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let record = ContextRecord::with_request_id(request_id);
    let mut response = context().run(record, next.run(request)).await;

    response
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);

    Ok(response)
}

/// Returns the inbound id when the header is present and non-empty.
fn inbound_request_id(headers: &HeaderMap) -> Option<(String, HeaderValue)> {
    let value = headers.get(REQUEST_ID_HEADER)?;
    if value.is_empty() {
        return None;
    }
    Some((id_from_header(value), value.clone()))
}

fn to_header_value(id: &str) -> Result<HeaderValue, GenerateError> {
    if id.is_empty() {
        return Err(GenerateError::Empty);
    }
    HeaderValue::from_str(id).map_err(|_| GenerateError::InvalidHeaderValue(id.to_owned()))
}
