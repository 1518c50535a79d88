//! Entry layer error types.

use thiserror::Error;

/// Result type for codec configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid codec configuration.
///
/// Encrypt and decrypt never fail; configuration is the only fallible step.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
