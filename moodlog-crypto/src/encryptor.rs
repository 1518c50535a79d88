//! Abstract content encryption interface.
//!
//! The entry codec depends on `Arc<dyn ContentEncryptor>` and never sees raw
//! keys. [`UserKeyEncryptor`] is the real implementation; tests and callers
//! without an authenticated user can use [`PassthroughEncryptor`].

use crate::cipher;
use crate::error::CryptoResult;
use crate::format::{self, WriteFormat};
use crate::key::{DerivedKey, KdfParams, derive_key};
use crate::key_cache::KeyCache;

/// Seals and opens the free-text content of a single record.
pub trait ContentEncryptor: Send + Sync {
    /// Encrypts `plaintext` for `user_id`, returning the stored text form.
    fn seal(&self, user_id: &str, plaintext: &str) -> CryptoResult<String>;

    /// Decrypts a stored payload (tagged or untagged) for `user_id`.
    fn open(&self, user_id: &str, stored: &str) -> CryptoResult<String>;

    /// Discards any key material held for `user_id`.
    fn forget(&self, _user_id: &str) {}

    /// Discards all key material held.
    fn forget_all(&self) {}
}

/// Derives a key per user identifier and encrypts with AES-256-GCM.
pub struct UserKeyEncryptor {
    params: KdfParams,
    write_format: WriteFormat,
    cache: Option<KeyCache>,
}

impl Default for UserKeyEncryptor {
    fn default() -> Self {
        Self::new(KdfParams::default(), WriteFormat::default())
    }
}

impl UserKeyEncryptor {
    /// Stateless encryptor: every call derives its own key.
    pub fn new(params: KdfParams, write_format: WriteFormat) -> Self {
        Self {
            params,
            write_format,
            cache: None,
        }
    }

    /// Encryptor that memoizes derived keys until [`ContentEncryptor::forget`].
    pub fn with_key_cache(params: KdfParams, write_format: WriteFormat) -> Self {
        Self {
            params,
            write_format,
            cache: Some(KeyCache::new(params)),
        }
    }

    pub fn write_format(&self) -> WriteFormat {
        self.write_format
    }

    /// Number of keys currently cached (0 when caching is off).
    pub fn cached_keys(&self) -> usize {
        self.cache.as_ref().map_or(0, KeyCache::len)
    }

    fn key_for(&self, user_id: &str) -> CryptoResult<DerivedKey> {
        match &self.cache {
            Some(cache) => cache.get_or_derive(user_id),
            None => derive_key(user_id, &self.params),
        }
    }
}

impl ContentEncryptor for UserKeyEncryptor {
    fn seal(&self, user_id: &str, plaintext: &str) -> CryptoResult<String> {
        let key = self.key_for(user_id)?;
        let payload = cipher::encrypt(&key, plaintext)?;
        Ok(format::to_stored(&payload, self.write_format))
    }

    fn open(&self, user_id: &str, stored: &str) -> CryptoResult<String> {
        let payload = format::parse_stored(stored)?;
        let key = self.key_for(user_id)?;
        cipher::decrypt(&key, &payload)
    }

    fn forget(&self, user_id: &str) {
        if let Some(cache) = &self.cache {
            cache.forget(user_id);
        }
    }

    fn forget_all(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

/// No-op encryptor. Content passes through unchanged.
pub struct PassthroughEncryptor;

impl ContentEncryptor for PassthroughEncryptor {
    fn seal(&self, _user_id: &str, plaintext: &str) -> CryptoResult<String> {
        Ok(plaintext.to_string())
    }

    fn open(&self, _user_id: &str, stored: &str) -> CryptoResult<String> {
        Ok(stored.to_string())
    }
}
