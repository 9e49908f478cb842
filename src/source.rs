//! Synonym sources: where candidate synonyms come from.
//!
//! Two implementations of [`SynonymSource`]:
//! - [`FixtureSource`]: a static JSON word → list mapping on disk
//! - [`ThesaurusClient`]: the live Big Huge Thesaurus API
//!
//! Both return a [`CandidateMap`] keyed by exactly the requested words,
//! in request order. The live client is best effort per word: a failed
//! request is logged and yields an empty list for that word.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::types::{ApiConfig, CandidateMap, SourceConfig, WordMap};

/// Errors raised while setting up or querying a synonym source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The API key file could not be read.
    #[error("cannot read API key file {path}: {source}")]
    KeyFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The API key file exists but its first line is blank.
    #[error("API key file {0} is empty")]
    EmptyKey(PathBuf),

    /// The fixture file could not be read.
    #[error("cannot read fixture {path}: {source}")]
    FixtureRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The fixture is not a JSON object of word → list of strings.
    #[error("malformed fixture {path}: {source}")]
    FixtureFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The configured base URL cannot take path segments.
    #[error("invalid API URL {url}: {reason}")]
    BaseUrl { url: String, reason: String },

    /// The HTTP client could not be built.
    #[error("cannot build HTTP client: {0}")]
    Client(reqwest::Error),

    /// A single request failed (network, status, or body).
    #[error("request for {word:?} failed: {source}")]
    Request {
        word: String,
        source: reqwest::Error,
    },
}

/// Anything that can turn a list of words into candidate synonyms.
pub trait SynonymSource {
    fn fetch(&self, words: &[String]) -> Result<CandidateMap, SourceError>;
}

/// Build the source selected by the configuration.
pub fn source_from_config(config: &SourceConfig) -> Result<Box<dyn SynonymSource>, SourceError> {
    match config {
        SourceConfig::Fixture { path, latency } => Ok(Box::new(FixtureSource {
            path: path.clone(),
            latency: *latency,
        })),
        SourceConfig::Api(api) => Ok(Box::new(ThesaurusClient::from_config(api)?)),
    }
}

/// Drop repeated words, keeping the first occurrence.
fn unique_words(words: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(words.len());
    for word in words {
        if !seen.contains(&word.as_str()) {
            seen.push(word);
        }
    }
    seen
}

// ============================================================================
// FIXTURE
// ============================================================================

/// Serves candidates from a JSON fixture file.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    pub path: PathBuf,
    /// Sleep this long before answering, to imitate a network round trip.
    pub latency: Option<Duration>,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            latency: None,
        }
    }

    fn load(&self) -> Result<WordMap, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::FixtureRead {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SourceError::FixtureFormat {
            path: self.path.clone(),
            source,
        })
    }
}

impl SynonymSource for FixtureSource {
    fn fetch(&self, words: &[String]) -> Result<CandidateMap, SourceError> {
        let fixture = self.load()?;

        if let Some(latency) = self.latency {
            debug!(?latency, "simulating fetch latency");
            thread::sleep(latency);
        }

        let mut candidates = CandidateMap::new();
        for word in unique_words(words) {
            let synonyms = match fixture.get(word) {
                Some(list) => list.to_vec(),
                None => {
                    debug!(word, "word not in fixture");
                    Vec::new()
                }
            };
            candidates.insert(word, synonyms);
        }

        info!(
            fixture = %self.path.display(),
            words = candidates.len(),
            candidates = candidates.total_values(),
            "loaded candidates from fixture"
        );
        Ok(candidates)
    }
}

// ============================================================================
// LIVE THESAURUS
// ============================================================================

/// Client for the Big Huge Thesaurus API.
///
/// Request shape: `GET {base}/{key}/{word}/{format}`. The response groups
/// synonyms by part of speech: `{"noun": {"syn": [...]}, "verb": {...}}`.
pub struct ThesaurusClient {
    client: Client,
    base_url: Url,
    api_key: String,
    format: String,
}

impl ThesaurusClient {
    /// Build a client, reading the API key from the configured file.
    pub fn from_config(config: &ApiConfig) -> Result<Self, SourceError> {
        let api_key = read_api_key(&config.key_file)?;
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            client,
            base_url,
            api_key,
            format: config.format.clone(),
        })
    }

    /// Full request URL for one word.
    pub fn word_url(&self, word: &str) -> Url {
        request_url(&self.base_url, &self.api_key, word, &self.format)
    }

    /// Fetch the synonyms for a single word.
    pub fn fetch_word(&self, word: &str) -> Result<Vec<String>, SourceError> {
        let to_error = |source| SourceError::Request {
            word: word.to_string(),
            source,
        };

        let body: Value = self
            .client
            .get(self.word_url(word))
            .send()
            .and_then(|res| res.error_for_status())
            .and_then(|res| res.json())
            .map_err(to_error)?;

        Ok(collect_synonyms(&body))
    }
}

impl SynonymSource for ThesaurusClient {
    fn fetch(&self, words: &[String]) -> Result<CandidateMap, SourceError> {
        let mut candidates = CandidateMap::new();

        for word in unique_words(words) {
            let synonyms = match self.fetch_word(word) {
                Ok(synonyms) => {
                    debug!(word, count = synonyms.len(), "fetched synonyms");
                    synonyms
                }
                Err(e) => {
                    warn!(word, error = %e, "synonym lookup failed; continuing without candidates");
                    Vec::new()
                }
            };
            candidates.insert(word, synonyms);
        }

        info!(
            words = candidates.len(),
            candidates = candidates.total_values(),
            "fetched candidates from thesaurus"
        );
        Ok(candidates)
    }
}

/// First line of the key file, trimmed.
fn read_api_key(path: &Path) -> Result<String, SourceError> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::KeyFile {
        path: path.to_path_buf(),
        source,
    })?;
    let key = text.lines().next().unwrap_or("").trim();
    if key.is_empty() {
        return Err(SourceError::EmptyKey(path.to_path_buf()));
    }
    Ok(key.to_string())
}

fn parse_base_url(raw: &str) -> Result<Url, SourceError> {
    let url = Url::parse(raw).map_err(|e| SourceError::BaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(SourceError::BaseUrl {
            url: raw.to_string(),
            reason: "URL cannot take path segments".to_string(),
        });
    }
    Ok(url)
}

/// Append key, word and format as percent-encoded path segments.
fn request_url(base: &Url, api_key: &str, word: &str, format: &str) -> Url {
    let mut url = base.clone();
    // parse_base_url rejected cannot-be-a-base URLs, so this always succeeds
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(api_key).push(word).push(format);
    }
    url
}

/// Concatenate every `syn` list in the response, in response order.
///
/// Groups without a `syn` key (e.g. only `ant` or `rel`) contribute nothing.
/// Non-string entries are skipped.
pub fn collect_synonyms(body: &Value) -> Vec<String> {
    let Some(groups) = body.as_object() else {
        return Vec::new();
    };

    groups
        .values()
        .filter_map(|group| group.get("syn")?.as_array())
        .flatten()
        .filter_map(|syn| syn.as_str().map(str::to_string))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
