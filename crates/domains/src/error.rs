//! # AppError
//!
//! Centralized error handling for the Phishwatch ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., case, comment)
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// Validation failure (e.g., title too short, unknown category)
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource already exists (e.g., duplicate case slug)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down, cache timeout)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for Phishwatch logic.
pub type Result<T> = std::result::Result<T, AppError>;
