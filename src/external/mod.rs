//! Outbound HTTP plumbing.

pub mod client;

pub use client::{HTTP_CLIENT, with_request_id};
