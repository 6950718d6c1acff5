//! Correlation echo DTO.

use serde::Serialize;

/// The request id as seen from each vantage point inside a handler.
///
/// All three agree for any request that went through the correlation
/// middleware.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestIdResponse {
    /// Read from the current context record
    pub request_id: Option<String>,
    /// Read from the inbound `x-request-id` header
    pub req_request_id: Option<String>,
    /// Read from a task spawned by the handler after an await point
    pub background_request_id: Option<String>,
}
