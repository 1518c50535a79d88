//! Key derivation from a user identifier.
//!
//! The identifier supplied by the authentication provider is treated as
//! password material and stretched with PBKDF2-HMAC-SHA256 under a salt
//! shared by every account. There is no key store: the same identifier must
//! always produce the same key, or previously written entries become
//! unreadable.
//!
//! The shared salt predates this crate and is kept for compatibility with
//! entries already at rest. It gives no per-account diversification beyond
//! the identifier itself and should not be copied into new designs.

use crate::error::{CryptoError, CryptoResult};
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a derived key in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// Application-wide salt mixed into every derivation.
pub const APP_SALT: &[u8] = b"moodlog-journal-content-salt-v1";

/// Work factor used for all entries written so far.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// PBKDF2 parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfParams {
    /// PBKDF2 round count. Must be non-zero.
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Parameters with a custom round count.
    ///
    /// Anything other than [`DEFAULT_ITERATIONS`] produces keys that cannot
    /// read existing entries; intended for tests.
    pub fn with_iterations(iterations: u32) -> Self {
        Self { iterations }
    }
}

/// A 256-bit AES-GCM key derived from a user identifier.
///
/// The raw bytes never leave the crate, so the key can only be used through
/// the cipher in this crate. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { key: bytes }
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        // Accumulate without early exit.
        self.key
            .iter()
            .zip(other.key.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl Eq for DerivedKey {}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derives the content key for `user_id`.
///
/// Empty identifiers are rejected with [`CryptoError::MissingIdentifier`]
/// rather than producing a shared key; callers without an authenticated
/// user are expected to skip encryption before getting here.
pub fn derive_key(user_id: &str, params: &KdfParams) -> CryptoResult<DerivedKey> {
    if user_id.is_empty() {
        return Err(CryptoError::MissingIdentifier);
    }
    if params.iterations == 0 {
        return Err(CryptoError::KeyUnavailable(
            "PBKDF2 iteration count must be non-zero".to_string(),
        ));
    }

    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(user_id.as_bytes(), APP_SALT, params.iterations, &mut key);

    let derived = DerivedKey::from_bytes(key);
    key.zeroize();
    Ok(derived)
}
