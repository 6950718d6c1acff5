//! Data transfer objects for the HTTP API.

mod correlation;
mod error;
mod health;

pub use correlation::RequestIdResponse;
pub use error::ErrorResponse;
pub use health::{HealthResponse, HealthStatus};
