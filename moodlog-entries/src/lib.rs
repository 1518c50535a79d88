//! Journal entry records and the content codec.
//!
//! The persistence layer calls [`EntryCodec::encrypt_entry`] right before a
//! record is written and [`EntryCodec::decrypt_entry`] right after it is read,
//! passing the signed-in user's identifier. Only the `content` field changes.

pub mod codec;
pub mod config;
pub mod entry;
pub mod error;

pub use codec::EntryCodec;
pub use config::CodecConfig;
pub use entry::{ContentRecord, JournalEntry, Mood, Track, Weather};
pub use error::{ConfigError, ConfigResult};
