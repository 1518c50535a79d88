//! AES-256-GCM encryption of a single text payload.
//!
//! Each call draws a fresh 96-bit nonce from the OS RNG; the nonce is stored
//! in front of the ciphertext so a payload is self-contained:
//!
//! ```text
//! nonce (12 bytes) || ciphertext || GCM tag (16 bytes)
//! ```
//!
//! Payloads are stored as standard-alphabet base64 without line wrapping.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// GCM nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Smallest byte length a valid payload can have (empty plaintext).
pub const MIN_PAYLOAD_SIZE: usize = NONCE_SIZE + TAG_SIZE;

/// Nonce plus authenticated ciphertext, as produced by [`encrypt`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedPayload {
    nonce: [u8; NONCE_SIZE],
    /// Ciphertext with the GCM tag appended.
    ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    pub fn nonce(&self) -> &[u8; NONCE_SIZE] {
        &self.nonce
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Total size in bytes before text encoding.
    pub fn byte_len(&self) -> usize {
        NONCE_SIZE + self.ciphertext.len()
    }

    /// `nonce || ciphertext+tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Splits raw bytes into nonce and ciphertext.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() < MIN_PAYLOAD_SIZE {
            return Err(CryptoError::MalformedPayload(format!(
                "payload is {} bytes, minimum is {MIN_PAYLOAD_SIZE}",
                bytes.len()
            )));
        }
        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_SIZE);
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(nonce_bytes);
        Ok(Self {
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Base64 text form used for storage.
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Parses the base64 text form.
    pub fn decode(text: &str) -> CryptoResult<Self> {
        let bytes = STANDARD
            .decode(text)
            .map_err(|e| CryptoError::MalformedPayload(format!("base64 decode: {e}")))?;
        Self::from_bytes(&bytes)
    }
}

fn cipher_for(key: &DerivedKey) -> CryptoResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::KeyUnavailable(format!("AES-256-GCM init: {e}")))
}

/// Encrypts `plaintext` under `key` with a freshly generated nonce.
pub fn encrypt(key: &DerivedKey, plaintext: &str) -> CryptoResult<EncryptedPayload> {
    let cipher = cipher_for(key)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("AES-256-GCM seal failed: {e}")))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    nonce_bytes.copy_from_slice(nonce.as_slice());

    Ok(EncryptedPayload {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypts and authenticates `payload`, returning the original text.
///
/// Fails with [`CryptoError::IntegrityFailure`] when the tag does not verify;
/// no plaintext is released in that case.
pub fn decrypt(key: &DerivedKey, payload: &EncryptedPayload) -> CryptoResult<String> {
    let cipher = cipher_for(key)?;

    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(&payload.nonce),
            payload.ciphertext.as_slice(),
        )
        .map_err(|_| CryptoError::IntegrityFailure)?;

    String::from_utf8(plaintext)
        .map_err(|e| CryptoError::MalformedPayload(format!("plaintext is not UTF-8: {e}")))
}
