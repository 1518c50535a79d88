//! Content encryption error types.

use thiserror::Error;

/// Result type for content encryption operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors surfaced by key derivation and the authenticated cipher.
///
/// The entry codec recovers from every variant by failing open; these only
/// travel as far as the codec boundary.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("user identifier is required for key derivation")]
    MissingIdentifier,

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("integrity check failed (wrong key or tampered data)")]
    IntegrityFailure,

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}
