//! Cross-cutting error types for kpopnet.
//!
//! This module defines errors that can originate from any crate in the system.
//! Domain-specific errors (e.g., `SchemaError`, `PublishError`) are defined in
//! their respective crates. They converge into `anyhow` in `kpop-cli`.

use thiserror::Error;

/// Errors that can be raised by any kpopnet crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Record lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A date string did not match the expected wire form.
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
