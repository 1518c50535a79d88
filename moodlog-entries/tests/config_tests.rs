use moodlog_crypto::{KdfParams, WriteFormat};
use moodlog_entries::{CodecConfig, ConfigError};

#[test]
fn default_iterations() {
    assert_eq!(CodecConfig::default().kdf.iterations, 100_000);
}

#[test]
fn default_write_format_is_tagged() {
    assert_eq!(CodecConfig::default().write_format, WriteFormat::Tagged);
}

#[test]
fn default_cache_disabled() {
    assert!(!CodecConfig::default().cache_keys);
}

#[test]
fn empty_json_takes_defaults() {
    let config = CodecConfig::from_json("{}").unwrap();
    assert_eq!(config, CodecConfig::default());
}

#[test]
fn partial_json_overrides_fields() {
    let config =
        CodecConfig::from_json(r#"{"write_format": "untagged", "cache_keys": true}"#).unwrap();
    assert_eq!(config.write_format, WriteFormat::Untagged);
    assert!(config.cache_keys);
    assert_eq!(config.kdf, KdfParams::default());
}

#[test]
fn zero_iterations_rejected() {
    let err = CodecConfig::from_json(r#"{"kdf": {"iterations": 0}}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid configuration: kdf.iterations must be greater than zero"
    );
}

#[test]
fn malformed_json_is_parse_error() {
    let err = CodecConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn serialization_roundtrip() {
    let config = CodecConfig {
        kdf: KdfParams::with_iterations(5000),
        write_format: WriteFormat::Untagged,
        cache_keys: true,
    };
    let json = serde_json::to_string(&config).unwrap();
    let parsed: CodecConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}
