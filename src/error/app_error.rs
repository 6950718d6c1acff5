use thiserror::Error;

use crate::request_id::GenerateError;

/// Application-wide error type that represents all possible errors in the system.
///
/// Handlers and middleware return it through the same channel, so a failure
/// anywhere in the pipeline is rendered by one `IntoResponse` implementation.
#[derive(Error, Debug)]
pub enum AppError {
    /// No route matched the request path
    #[error("Resource not found: {method} {path}")]
    NotFound { method: String, path: String },

    /// The correlation id could not be produced; the request cannot continue
    #[error("Request id generation failed")]
    RequestIdGeneration {
        #[source]
        source: GenerateError,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<GenerateError> for AppError {
    fn from(error: GenerateError) -> Self {
        AppError::RequestIdGeneration { source: error }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        AppError::Internal {
            source: anyhow::Error::new(error).context("Background task failed"),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_error_conversion() {
        let err: AppError = GenerateError::Empty.into();
        assert!(matches!(err, AppError::RequestIdGeneration { .. }));
        assert_eq!(err.to_string(), "Request id generation failed");
    }

    #[tokio::test]
    async fn test_join_error_conversion() {
        let join_error = tokio::spawn(async { panic!("boom") }).await.unwrap_err();

        let err: AppError = join_error.into();
        match err {
            AppError::Internal { source } => {
                assert_eq!(source.to_string(), "Background task failed")
            }
            other => panic!("Expected Internal error, got {:?}", other),
        }
    }
}
