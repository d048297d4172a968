//! Configuration error types.

use thiserror::Error;
use wt_core::CoreError;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { field, reason } => {
                Self::Validation(format!("{field}: {reason}"))
            }
            other => Self::Other(anyhow::Error::new(other)),
        }
    }
}
