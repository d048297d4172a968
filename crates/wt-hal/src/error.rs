//! Error types for HAL resource loading.

use thiserror::Error;
use wt_core::CoreError;

/// Errors raised while loading or interpreting HAL documents.
///
/// The enum is `Clone` so that one failed fetch can be observed by every
/// caller sharing the same in-flight load future; transport errors are
/// stringified at the boundary for that reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HalError {
    /// The resource carries no self link to load from.
    #[error("resource has no self link to load from")]
    NoSelfLink,

    /// The resource was built without a fetch backend.
    #[error("resource is not attached to a fetch backend")]
    Detached,

    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("unexpected status {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not a usable HAL document.
    #[error("failed to decode resource document: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for HalError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

impl From<HalError> for CoreError {
    fn from(err: HalError) -> Self {
        match err {
            HalError::Decode(reason) => Self::Validation(reason),
            other => Self::Other(anyhow::Error::new(other)),
        }
    }
}
