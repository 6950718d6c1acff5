//! Reqscope Library
//!
//! Request-scoped correlation for axum services: a process-wide context store
//! that follows each request through its asynchronous continuations, and the
//! `x-request-id` middleware that seeds it.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod external;
pub mod logger;
pub mod request_id;
pub mod server;
pub mod state;

pub use context::{ContextRecord, ContextStore, context};
pub use request_id::{REQUEST_ID_HEADER, RequestIdGenerator};
pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
