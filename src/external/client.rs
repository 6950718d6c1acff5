//! Shared HTTP client for calls to downstream services.
//!
//! Requests built here can be tagged with the current correlation id so the
//! downstream service logs under the same `x-request-id`.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::RequestBuilder;

use crate::context::context;
use crate::request_id::{REQUEST_ID_HEADER, header_from_id};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance
///
/// Initialized lazily on first access and reused across the application.
///
/// # Features
/// - **Connection pooling**: Reuses TCP connections across requests
/// - **HTTP/2**: Adaptive window sizing and keep-alive
/// - **Timeouts**: 30s request timeout, 10s connect timeout
///
/// # Example
/// ```rust,ignore
/// use reqscope::external::{HTTP_CLIENT, with_request_id};
///
/// async fn fetch_data() -> Result<String, reqwest::Error> {
///     with_request_id(HTTP_CLIENT.get("https://api.example.com/data"))
///         .send()
///         .await?
///         .text()
///         .await
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
});

/// Adds `x-request-id` from the current context record, if there is one.
///
/// Outside a request scope the builder is returned untouched.
pub fn with_request_id(builder: RequestBuilder) -> RequestBuilder {
    match context().request_id().as_deref().and_then(header_from_id) {
        Some(value) => builder.header(REQUEST_ID_HEADER, value),
        None => builder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextRecord;

    #[test]
    fn test_client_initialization() {
        let _ = &*HTTP_CLIENT;
    }

    #[test]
    fn test_request_inside_scope_is_tagged() {
        let request = context()
            .run_sync(ContextRecord::with_request_id("out-1"), || {
                with_request_id(HTTP_CLIENT.get("http://localhost/downstream")).build()
            })
            .unwrap();

        assert_eq!(
            request.headers().get(REQUEST_ID_HEADER).unwrap(),
            "out-1"
        );
    }

    #[test]
    fn test_latin1_id_is_sent_as_original_bytes() {
        let request = context()
            .run_sync(ContextRecord::with_request_id("caf\u{e9}-42"), || {
                with_request_id(HTTP_CLIENT.get("http://localhost/downstream")).build()
            })
            .unwrap();

        assert_eq!(
            request.headers().get(REQUEST_ID_HEADER).unwrap().as_bytes(),
            b"caf\xe9-42"
        );
    }

    #[test]
    fn test_request_outside_scope_is_untouched() {
        let request = with_request_id(HTTP_CLIENT.get("http://localhost/downstream"))
            .build()
            .unwrap();

        assert!(request.headers().get(REQUEST_ID_HEADER).is_none());
    }
}
