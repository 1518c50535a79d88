//! Content encryption for Moodlog journal entries.
//!
//! Protects the free-text `content` of an entry at rest using:
//! - PBKDF2-HMAC-SHA256 (100 000 rounds) to derive a key from the user
//!   identifier issued by the auth provider
//! - AES-256-GCM with a fresh random nonce per encryption
//! - A stored-form classifier that tells legacy plaintext apart from payloads
//!
//! # Architecture
//!
//! There is no key store. The key is a pure function of the identifier and a
//! shared application salt, so any device signed in as the same user can
//! read the same entries.
//!
//! Metadata (mood, timestamps, tags) is out of scope and stays plaintext.

mod cipher;
pub mod encryptor;
mod error;
pub mod format;
mod key;
pub mod key_cache;

pub use cipher::{EncryptedPayload, MIN_PAYLOAD_SIZE, NONCE_SIZE, TAG_SIZE, decrypt, encrypt};
pub use encryptor::{ContentEncryptor, PassthroughEncryptor, UserKeyEncryptor};
pub use error::{CryptoError, CryptoResult};
pub use format::{FORMAT_TAG, LEGACY_MARKER, StoredForm, WriteFormat, classify, looks_encrypted};
pub use key::{APP_SALT, DEFAULT_ITERATIONS, DerivedKey, KEY_SIZE, KdfParams, derive_key};
pub use key_cache::KeyCache;
