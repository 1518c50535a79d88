//! Journal entry records.
//!
//! Only `content` is ever encrypted. Mood, weather, track, tags and
//! timestamps stay plaintext so the persistence layer can filter and sort on
//! them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record with exactly one free-text field that the codec may encrypt.
pub trait ContentRecord: Clone {
    fn content(&self) -> &str;

    fn content_mut(&mut self) -> &mut String;

    /// Identifier used in diagnostics. Never the content itself.
    fn record_id(&self) -> Option<String> {
        None
    }

    /// Copy of `self` with `content` replaced.
    fn with_content(&self, content: String) -> Self {
        let mut copy = self.clone();
        *copy.content_mut() = content;
        copy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Joyful,
    Content,
    Calm,
    Neutral,
    Tired,
    Sad,
    Anxious,
    Angry,
}

/// Weather snapshot attached when the entry was written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub condition: String,
    pub temperature_c: Option<f32>,
    pub location: Option<String>,
}

/// Music track attached to an entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub url: Option<String>,
}

/// A journal entry as the application sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    /// Free text. Plaintext in memory; plaintext or payload at rest.
    pub content: String,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub track: Option<Track>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    /// New entry with a time-ordered id and both timestamps set to now.
    pub fn new(content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            content: content.into(),
            mood: None,
            weather: None,
            track: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.track = Some(track);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl ContentRecord for JournalEntry {
    fn content(&self) -> &str {
        &self.content
    }

    fn content_mut(&mut self) -> &mut String {
        &mut self.content
    }

    fn record_id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}
