//! Cross-cutting error types for Worktable.
//!
//! This module defines errors that can originate from any crate in the
//! system. Domain-specific errors (e.g., `HalError`, `ConfigError`) are
//! defined in their respective crates.

use thiserror::Error;

/// Errors that can be raised by any Worktable crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Resource lookup returned no result.
    #[error("Resource not found: {kind} {href}")]
    NotFound { kind: String, href: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
