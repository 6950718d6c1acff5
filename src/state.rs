//! Application state for Axum web framework.
//!
//! Contains the shared resources handlers and middleware read from.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{ApplicationConfig, Settings};
use crate::request_id::{SharedGenerator, UuidV4Generator};

/// Application state shared by every request.
///
/// Cloning is cheap: the generator sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Produces ids for requests that arrive without one
    pub generator: SharedGenerator,
    pub application: ApplicationConfig,
    /// Upper bound on handler time before a 408 is returned
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        generator: SharedGenerator,
        application: ApplicationConfig,
        request_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            application,
            request_timeout,
        }
    }

    /// Builds the state from loaded settings, picking the configured generator.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.request_id.generator.build(),
            settings.application.clone(),
            Duration::from_secs(settings.server.request_timeout),
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(UuidV4Generator),
            ApplicationConfig::default(),
            Duration::from_secs(30),
        )
    }
}
