//! Stored representation of journal content.
//!
//! Content at rest is one of:
//!
//! - plaintext, for entries written before encryption existed or written
//!   while encryption was failing;
//! - an untagged payload: bare base64 of `nonce || ciphertext+tag`;
//! - a tagged payload: [`FORMAT_TAG`] followed by the same base64.
//!
//! Tagged payloads are recognised exactly. Everything else goes through a
//! whitespace heuristic, since untagged payloads carry no marker of their
//! own and no migration has rewritten them.

use crate::cipher::EncryptedPayload;
use crate::error::CryptoResult;
use serde::{Deserialize, Serialize};

/// Prefix written in front of every tagged payload.
pub const FORMAT_TAG: &str = "mlenc1:";

/// Prefix of OpenSSL-style salted ciphertext (`"Salted__"` in base64).
///
/// Strings starting with it are treated as encrypted even when they contain
/// whitespace.
pub const LEGACY_MARKER: &str = "U2FsdGVkX1";

/// How new payloads are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteFormat {
    /// Prefix with [`FORMAT_TAG`].
    #[default]
    Tagged,
    /// Bare base64, readable by clients that predate the tag.
    Untagged,
}

/// Classification of a stored content string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoredForm {
    Plaintext,
    Tagged,
    Untagged,
}

impl StoredForm {
    pub fn is_encrypted(self) -> bool {
        !matches!(self, StoredForm::Plaintext)
    }
}

/// Decides whether `stored` should be decrypted.
///
/// Rules, in order:
/// 1. empty ⇒ plaintext;
/// 2. starts with [`FORMAT_TAG`] ⇒ tagged;
/// 3. contains whitespace and does not start with [`LEGACY_MARKER`] ⇒ plaintext;
/// 4. otherwise ⇒ untagged payload.
///
/// Rules 3 and 4 are a heuristic: a single word with no spaces is reported as
/// encrypted, and its decryption will fail.
///
/// Whitespace is the Unicode `White_Space` property ([`char::is_whitespace`]).
/// That covers ASCII space, tab and line breaks, NBSP and the other Unicode
/// spaces. U+FEFF (byte order mark) is not whitespace here, so a BOM between
/// two words does not by itself make text plaintext.
pub fn classify(stored: &str) -> StoredForm {
    if stored.is_empty() {
        return StoredForm::Plaintext;
    }
    if stored.starts_with(FORMAT_TAG) {
        return StoredForm::Tagged;
    }
    if stored.chars().any(char::is_whitespace) && !stored.starts_with(LEGACY_MARKER) {
        return StoredForm::Plaintext;
    }
    StoredForm::Untagged
}

/// Boolean form of [`classify`].
pub fn looks_encrypted(stored: &str) -> bool {
    classify(stored).is_encrypted()
}

/// Serializes `payload` for storage.
pub fn to_stored(payload: &EncryptedPayload, format: WriteFormat) -> String {
    match format {
        WriteFormat::Tagged => format!("{FORMAT_TAG}{}", payload.encode()),
        WriteFormat::Untagged => payload.encode(),
    }
}

/// Parses a stored payload in either form.
pub fn parse_stored(stored: &str) -> CryptoResult<EncryptedPayload> {
    let body = stored.strip_prefix(FORMAT_TAG).unwrap_or(stored);
    EncryptedPayload::decode(body)
}
