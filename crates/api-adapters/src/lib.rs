//! The web routing and orchestration layer for Phishwatch.
//!
//! Thin axum handlers over the services: decode the request, call one
//! use-case, map the result into the wire DTOs.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use metrics::HttpMetrics;
pub use routes::router;
pub use state::{AppState, SiteMeta};
