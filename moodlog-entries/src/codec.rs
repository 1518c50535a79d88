//! Entry codec: encrypts `content` before a record is written and decrypts
//! it after it is read.
//!
//! The codec fails open in both directions. A failed encryption stores the
//! original plaintext; a failed decryption returns the stored string as-is.
//! Neither path returns an error, so a crypto fault can never cost the user
//! an entry or block the read path. Failures are logged with `warn!`.

use crate::config::CodecConfig;
use crate::entry::ContentRecord;
use crate::error::ConfigResult;
use moodlog_crypto::{ContentEncryptor, StoredForm, UserKeyEncryptor, classify};
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless content codec over any [`ContentRecord`].
#[derive(Clone)]
pub struct EntryCodec {
    encryptor: Arc<dyn ContentEncryptor>,
}

impl Default for EntryCodec {
    fn default() -> Self {
        Self::with_encryptor(Arc::new(UserKeyEncryptor::default()))
    }
}

impl EntryCodec {
    /// Builds a codec backed by [`UserKeyEncryptor`] after validating `config`.
    pub fn from_config(config: &CodecConfig) -> ConfigResult<Self> {
        config.validate()?;
        let encryptor = if config.cache_keys {
            UserKeyEncryptor::with_key_cache(config.kdf, config.write_format)
        } else {
            UserKeyEncryptor::new(config.kdf, config.write_format)
        };
        Ok(Self::with_encryptor(Arc::new(encryptor)))
    }

    pub fn with_encryptor(encryptor: Arc<dyn ContentEncryptor>) -> Self {
        Self { encryptor }
    }

    /// Returns a copy of `entry` with its content encrypted for `user_id`.
    ///
    /// A missing entry, an empty `user_id`, or empty content is a no-op.
    pub fn encrypt_entry<R: ContentRecord>(&self, entry: Option<&R>, user_id: &str) -> Option<R> {
        let entry = entry?;
        if user_id.is_empty() {
            debug!("no user identifier, storing content unencrypted");
            return Some(entry.clone());
        }
        if entry.content().is_empty() {
            return Some(entry.clone());
        }

        match self.encryptor.seal(user_id, entry.content()) {
            Ok(sealed) => Some(entry.with_content(sealed)),
            Err(e) => {
                warn!(
                    "content encryption failed for record {}, storing plaintext: {e}",
                    describe(entry)
                );
                Some(entry.clone())
            }
        }
    }

    /// Returns a copy of `entry` with its content decrypted for `user_id`.
    ///
    /// Legacy plaintext passes through. Anything that fails to decrypt is
    /// returned exactly as stored.
    pub fn decrypt_entry<R: ContentRecord>(&self, entry: Option<&R>, user_id: &str) -> Option<R> {
        let entry = entry?;
        if user_id.is_empty() || entry.content().is_empty() {
            return Some(entry.clone());
        }

        if classify(entry.content()) == StoredForm::Plaintext {
            debug!("record {} holds plaintext content", describe(entry));
            return Some(entry.clone());
        }

        match self.encryptor.open(user_id, entry.content()) {
            Ok(plaintext) => Some(entry.with_content(plaintext)),
            Err(e) => {
                warn!(
                    "content decryption failed for record {}, returning stored text: {e}",
                    describe(entry)
                );
                Some(entry.clone())
            }
        }
    }

    /// [`Self::encrypt_entry`] over a batch. Order and length are preserved.
    pub fn encrypt_entries<R: ContentRecord>(&self, entries: &[R], user_id: &str) -> Vec<R> {
        entries
            .iter()
            .filter_map(|entry| self.encrypt_entry(Some(entry), user_id))
            .collect()
    }

    /// [`Self::decrypt_entry`] over a batch. Order and length are preserved.
    pub fn decrypt_entries<R: ContentRecord>(&self, entries: &[R], user_id: &str) -> Vec<R> {
        entries
            .iter()
            .filter_map(|entry| self.decrypt_entry(Some(entry), user_id))
            .collect()
    }

    /// Drops any key material held for `user_id`.
    pub fn sign_out(&self, user_id: &str) {
        self.encryptor.forget(user_id);
    }

    /// Drops all held key material.
    pub fn forget_all(&self) {
        self.encryptor.forget_all();
    }
}

fn describe<R: ContentRecord>(entry: &R) -> String {
    entry
        .record_id()
        .unwrap_or_else(|| "<unidentified>".to_string())
}
