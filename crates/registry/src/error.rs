//! Unified error handling for the registry.
//!
//! Every store and service operation returns `Result<T, RegistryError>`. The
//! variants follow the registry's failure taxonomy: callers can tell a miss
//! from a duplicate from a dependency conflict from a connection failure,
//! and the lookup server maps each to a distinct HTTP status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::services::resolver::ResolveError;

/// Application-level error type for the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Malformed user input (empty required field, bad age, bad code).
    #[error("invalid input: {0}")]
    Validation(String),

    /// A natural-key lookup yielded no row.
    #[error("{0} not found")]
    NotFound(String),

    /// An insert collided with an existing natural key.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// The store rejected a write because dependent records exist.
    #[error("dependent records exist: {0}")]
    Integrity(String),

    /// Connection or statement execution failure.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Postal-code lookup failure (network, timeout, malformed, not found).
    #[error("address lookup failed: {0}")]
    Resolution(#[from] ResolveError),

    /// A stored row failed domain validation on the way out.
    #[error("data corruption: {0}")]
    Corrupt(String),

    /// Export serialization failure.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Export file write failure.
    #[error("export write failed: {0}")]
    ExportIo(#[from] std::io::Error),

    /// Migration failure.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Storage(_) | Self::Corrupt(_)) {
            tracing::error!(error = %self, "request failed");
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Resolution(ResolveError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadyExists(_) | Self::Integrity(_) => StatusCode::CONFLICT,
            Self::Resolution(_) => StatusCode::BAD_GATEWAY,
            Self::Storage(_)
            | Self::Corrupt(_)
            | Self::Serialize(_)
            | Self::ExportIo(_)
            | Self::Migrate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details (including file paths) to clients
        let message = match &self {
            Self::Storage(_)
            | Self::Corrupt(_)
            | Self::Serialize(_)
            | Self::ExportIo(_)
            | Self::Migrate(_) => "internal error".to_owned(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}


/// Result type alias for [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;
