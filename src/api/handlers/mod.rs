//! HTTP request handlers.

pub mod correlation;
pub mod health;

use axum::http::{Method, Uri};

use crate::error::AppError;

/// Fallback for paths no route matched.
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
