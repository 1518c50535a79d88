//! Codec configuration.

use crate::error::{ConfigError, ConfigResult};
use moodlog_crypto::{DEFAULT_ITERATIONS, KdfParams, WriteFormat};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for the entry codec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Key derivation parameters. Must match what existing entries were
    /// written with.
    pub kdf: KdfParams,

    /// Stored form for newly encrypted content.
    pub write_format: WriteFormat,

    /// Memoize derived keys per user until sign-out.
    pub cache_keys: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            write_format: WriteFormat::Tagged,
            cache_keys: false,
        }
    }
}

impl CodecConfig {
    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.kdf.iterations == 0 {
            return Err(ConfigError::Invalid(
                "kdf.iterations must be greater than zero".to_string(),
            ));
        }
        if self.kdf.iterations != DEFAULT_ITERATIONS {
            warn!(
                "kdf.iterations is {} (expected {DEFAULT_ITERATIONS}), existing entries won't open",
                self.kdf.iterations
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(CodecConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_iterations_invalid() {
        let config = CodecConfig {
            kdf: KdfParams::with_iterations(0),
            ..CodecConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
