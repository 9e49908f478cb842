//! Domain types for synonym-shortlist.
//!
//! The candidate map and the shortlist share one ordered map type:
//! insertion order of words, and of values within a word, is part of the
//! data and survives serialization.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// ORDERED WORD MAP
// ============================================================================

/// Ordered mapping from word to a list of strings.
///
/// Behaves like a map (one entry per word) but iterates in insertion order.
/// Inserting an existing word replaces its list in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordMap {
    entries: Vec<(String, Vec<String>)>,
}

/// Word → candidate synonyms, as delivered by a synonym source.
pub type CandidateMap = WordMap;

/// Word → accepted synonyms, built by the shortlisting session.
pub type Shortlist = WordMap;

impl WordMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map every word to an empty list, keeping the order given.
    pub fn with_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        words.into_iter().map(|w| (w.to_string(), Vec::new())).collect()
    }

    /// Insert or replace the list for `word`.
    pub fn insert(&mut self, word: impl Into<String>, values: Vec<String>) {
        let word = word.into();
        match self.entries.iter_mut().find(|(w, _)| *w == word) {
            Some(entry) => entry.1 = values,
            None => self.entries.push((word, values)),
        }
    }

    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Entry at a position in insertion order.
    pub fn entry_at(&self, index: usize) -> Option<(&str, &[String])> {
        self.entries
            .get(index)
            .map(|(w, values)| (w.as_str(), values.as_slice()))
    }

    /// Append a value to the list at `index`. Out-of-range indices are ignored.
    pub fn push_at(&mut self, index: usize, value: String) {
        if let Some((_, values)) = self.entries.get_mut(index) {
            values.push(value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(w, values)| (w.as_str(), values.as_slice()))
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(w, _)| w.as_str())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of list lengths across all words.
    pub fn total_values(&self) -> usize {
        self.entries.iter().map(|(_, values)| values.len()).sum()
    }
}

impl FromIterator<(String, Vec<String>)> for WordMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut map = WordMap::new();
        for (word, values) in iter {
            map.insert(word, values);
        }
        map
    }
}

impl Serialize for WordMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, values) in &self.entries {
            map.serialize_entry(word, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WordMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(WordMapVisitor)
    }
}

struct WordMapVisitor;

impl<'de> Visitor<'de> for WordMapVisitor {
    type Value = WordMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from word to a list of strings")
    }

    fn visit_map<A>(self, mut access: A) -> Result<WordMap, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = WordMap::new();
        while let Some((word, values)) = access.next_entry::<String, Vec<String>>()? {
            map.insert(word, values);
        }
        Ok(map)
    }
}

// ============================================================================
// SUMMARY & SAVE CHOICES
// ============================================================================

/// Aggregate view of a finished session, shown before the save menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Candidates across all words (every candidate the source offered).
    pub total_candidates: usize,
    /// Synonyms accepted across all words.
    pub total_accepted: usize,
    /// Input words in order.
    pub words: Vec<String>,
    /// Accepted synonyms per word, in word order.
    pub accepted: Vec<(String, Vec<String>)>,
}

impl Summary {
    pub fn new(candidates: &CandidateMap, shortlist: &Shortlist) -> Self {
        Summary {
            total_candidates: candidates.total_values(),
            total_accepted: shortlist.total_values(),
            words: candidates.words().map(str::to_string).collect(),
            accepted: shortlist
                .iter()
                .map(|(w, values)| (w.to_string(), values.to_vec()))
                .collect(),
        }
    }
}

/// On-disk format for a saved shortlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    /// Upper-cased word, one synonym per line, blank separator.
    Text,
    /// The shortlist mapping as a JSON object.
    Json,
}

impl SaveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Text => "txt",
            SaveFormat::Json => "json",
        }
    }
}

/// What the user picked from the save menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save(SaveFormat),
    Discard,
}

impl SaveChoice {
    /// Menu number → choice. `1` text, `2` JSON, `3` discard.
    pub fn from_menu_key(n: u8) -> Option<Self> {
        match n {
            1 => Some(SaveChoice::Save(SaveFormat::Text)),
            2 => Some(SaveChoice::Save(SaveFormat::Json)),
            3 => Some(SaveChoice::Discard),
            _ => None,
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Default thesaurus endpoint (Big Huge Thesaurus, API v2).
pub const DEFAULT_API_URL: &str = "https://words.bighugelabs.com/api/2";

/// Default location of the API key file, relative to the working directory.
pub const DEFAULT_API_KEY_FILE: &str = "api_key";

/// Default result-format marker appended to each request path.
pub const DEFAULT_RESULT_FORMAT: &str = "json";

/// Where candidate synonyms come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Static JSON fixture, optionally with simulated latency.
    Fixture {
        path: PathBuf,
        latency: Option<Duration>,
    },
    /// Live thesaurus API.
    Api(ApiConfig),
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Api(ApiConfig::default())
    }
}

/// Configuration for the live thesaurus client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL; key, word and format are appended as path segments.
    pub base_url: String,
    /// File whose first line is the API key.
    pub key_file: PathBuf,
    /// Result-format marker (the last path segment).
    pub format: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            key_file: PathBuf::from(DEFAULT_API_KEY_FILE),
            format: DEFAULT_RESULT_FORMAT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
