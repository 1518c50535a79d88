use moodlog_crypto::{
    CryptoError, DerivedKey, EncryptedPayload, KdfParams, NONCE_SIZE, TAG_SIZE, decrypt, derive_key,
    encrypt,
};
use std::collections::HashSet;

fn fast_key(user_id: &str) -> DerivedKey {
    derive_key(user_id, &KdfParams::with_iterations(10)).unwrap()
}

#[test]
fn production_params_round_trip() {
    let key = derive_key("user-42", &KdfParams::default()).unwrap();
    let payload = encrypt(&key, "Feeling anxious about the exam").unwrap();
    assert_eq!(
        decrypt(&key, &payload).unwrap(),
        "Feeling anxious about the exam"
    );
}

#[test]
fn same_plaintext_never_repeats() {
    let key = fast_key("user-1");
    let outputs: HashSet<String> = (0..100)
        .map(|_| encrypt(&key, "same words every day").unwrap().encode())
        .collect();
    assert_eq!(outputs.len(), 100);
}

#[test]
fn nonces_differ_between_calls() {
    let key = fast_key("user-1");
    let a = encrypt(&key, "x").unwrap();
    let b = encrypt(&key, "x").unwrap();
    assert_ne!(a.nonce(), b.nonce());
    assert_eq!(decrypt(&key, &a).unwrap(), decrypt(&key, &b).unwrap());
}

#[test]
fn flipping_any_byte_fails_integrity() {
    let key = fast_key("user-1");
    let bytes = encrypt(&key, "tamper me").unwrap().to_bytes();
    assert_eq!(bytes.len(), NONCE_SIZE + "tamper me".len() + TAG_SIZE);

    for i in 0..bytes.len() {
        let mut tampered = bytes.clone();
        tampered[i] ^= 0x01;
        let payload = EncryptedPayload::from_bytes(&tampered).unwrap();
        let result = decrypt(&key, &payload);
        assert!(
            matches!(result, Err(CryptoError::IntegrityFailure)),
            "byte {i} flip was not detected"
        );
    }
}

#[test]
fn truncated_payload_is_malformed() {
    let key = fast_key("user-1");
    let bytes = encrypt(&key, "").unwrap().to_bytes();
    let result = EncryptedPayload::from_bytes(&bytes[..bytes.len() - 1]);
    assert!(matches!(result, Err(CryptoError::MalformedPayload(_))));
}

#[test]
fn truncated_but_long_enough_payload_fails_integrity() {
    let key = fast_key("user-1");
    let bytes = encrypt(&key, "a longer entry body").unwrap().to_bytes();
    let payload = EncryptedPayload::from_bytes(&bytes[..bytes.len() - 1]).unwrap();
    assert!(matches!(
        decrypt(&key, &payload),
        Err(CryptoError::IntegrityFailure)
    ));
}

#[test]
fn error_display_strings() {
    assert_eq!(
        CryptoError::IntegrityFailure.to_string(),
        "integrity check failed (wrong key or tampered data)"
    );
    assert_eq!(
        CryptoError::MissingIdentifier.to_string(),
        "user identifier is required for key derivation"
    );
    assert_eq!(
        CryptoError::MalformedPayload("too short".into()).to_string(),
        "malformed payload: too short"
    );
    assert_eq!(
        CryptoError::KeyUnavailable("no rng".into()).to_string(),
        "key unavailable: no rng"
    );
    assert_eq!(
        CryptoError::Encryption("boom".into()).to_string(),
        "encryption failed: boom"
    );
}

// Property-based tests
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn encrypt_decrypt_always_roundtrips(
            plaintext in "\\PC{1,200}",
            user_id in "[a-zA-Z0-9_-]{1,40}",
        ) {
            let key = fast_key(&user_id);
            let payload = encrypt(&key, &plaintext).unwrap();
            prop_assert_eq!(payload.byte_len(), NONCE_SIZE + plaintext.len() + TAG_SIZE);
            prop_assert_eq!(decrypt(&key, &payload).unwrap(), plaintext);
        }

        #[test]
        fn derivation_is_deterministic(user_id in "\\PC{1,64}") {
            prop_assert_eq!(fast_key(&user_id), fast_key(&user_id));
        }

        #[test]
        fn distinct_identifiers_derive_distinct_keys(
            a in "[a-z0-9-]{1,32}",
            b in "[a-z0-9-]{1,32}",
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(fast_key(&a), fast_key(&b));
        }

        #[test]
        fn decode_rejects_or_fails_closed(garbage in "[A-Za-z0-9+/=]{0,80}") {
            let key = fast_key("user-1");
            if let Ok(payload) = EncryptedPayload::decode(&garbage) {
                prop_assert!(decrypt(&key, &payload).is_err());
            }
        }
    }
}
