//! sb-api: HTTP API for scriptbot
//!
//! Exposes the conversation handler over a single JSON endpoint.
//! Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use server::{AppState, router, start_server};
