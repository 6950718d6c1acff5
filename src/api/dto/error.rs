//! Error response DTOs.

use serde::Serialize;

use crate::context::context;

/// Standard error response format.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates an error response tagged with the current request id, if any.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            request_id: context().request_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextRecord;
    use serde_json::json;

    #[test]
    fn test_request_id_omitted_outside_scope() {
        let body = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "missing")).unwrap();
        assert_eq!(body, json!({ "code": "NOT_FOUND", "message": "missing" }));
    }

    #[test]
    fn test_request_id_taken_from_context() {
        let response = context().run_sync(ContextRecord::with_request_id("err-1"), || {
            ErrorResponse::new("INTERNAL_ERROR", "boom")
        });

        let body = serde_json::to_value(response).unwrap();
        assert_eq!(
            body,
            json!({ "code": "INTERNAL_ERROR", "message": "boom", "request_id": "err-1" })
        );
    }
}
