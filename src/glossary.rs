// Copyright 2025-present Bunrei Contributors
// SPDX-License-Identifier: Apache-2.0

//! Definition resolution for words outside the tier lists.
//!
//! The glossary is a persistent cache in front of a remote dictionary API.
//! Every resolution outcome is cached, including failures: a word the
//! service cannot define is written as [`Definition::NotFound`] so it is
//! never queried twice. The negative state is a tagged variant, not a magic
//! string, so a legitimately empty definition cannot collide with it.
//!
//! The cache file is a single JSON object, rewritten in full on every new
//! resolution. Losing a write costs one future remote call, nothing more.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Resolution outcome for a word, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "definition", rename_all = "snake_case")]
pub enum Definition {
    Found(String),
    NotFound,
}

/// External definition lookup capability.
///
/// `Ok(None)` means the service answered but had no definition; `Err` means
/// the service misbehaved. The glossary caches both as negative results,
/// but only the latter is logged.
pub trait DefinitionSource {
    fn lookup(&mut self, word: &str) -> Result<Option<String>, EngineError>;
}

/// Jisho-style HTTP client: GET with a `keyword` query parameter.
///
/// Enforces a minimum spacing between consecutive remote calls (the
/// service's implicit rate limit) and a bounded per-call timeout. The
/// spacing delay blocks only the resolving call path.
pub struct JishoClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    min_interval: Duration,
    last_call: Option<Instant>,
}

pub const DEFAULT_ENDPOINT: &str = "https://jisho.org/api/v1/search/words";
const CALL_TIMEOUT: Duration = Duration::from_secs(5);
const CALL_SPACING: Duration = Duration::from_millis(100);

/// Response shape: sense groups, each with a flat definition list. Only the
/// first group is consulted; its first two definitions are kept.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Vec<SenseGroup>,
}

#[derive(Deserialize)]
struct SenseGroup {
    #[serde(default)]
    senses: Vec<Sense>,
}

#[derive(Deserialize)]
struct Sense {
    #[serde(default)]
    english_definitions: Vec<String>,
}

fn flatten_definitions(response: &ApiResponse) -> Option<String> {
    let group = response.data.first()?;
    let flat: Vec<&str> = group
        .senses
        .iter()
        .flat_map(|sense| sense.english_definitions.iter().map(String::as_str))
        .collect();
    if flat.is_empty() {
        None
    } else {
        Some(flat[..flat.len().min(2)].join("; "))
    }
}

impl JishoClient {
    pub fn new() -> Result<Self, EngineError> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, EngineError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(CALL_TIMEOUT)
            .user_agent(concat!("bunrei/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EngineError::Lookup(e.to_string()))?;
        Ok(JishoClient {
            http,
            endpoint: endpoint.into(),
            min_interval: CALL_SPACING,
            last_call: None,
        })
    }

    fn respect_rate_limit(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                std::thread::sleep(self.min_interval - elapsed);
            }
        }
        self.last_call = Some(Instant::now());
    }
}

impl DefinitionSource for JishoClient {
    fn lookup(&mut self, word: &str) -> Result<Option<String>, EngineError> {
        self.respect_rate_limit();

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("keyword", word)])
            .send()
            .map_err(|e| EngineError::Lookup(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Lookup(format!("status {status} for '{word}'")));
        }

        let body: ApiResponse = response
            .json()
            .map_err(|e| EngineError::Lookup(format!("bad response body: {e}")))?;
        Ok(flatten_definitions(&body))
    }
}

/// Persistent definition cache in front of a [`DefinitionSource`].
pub struct Glossary<D> {
    cache: HashMap<String, Definition>,
    path: PathBuf,
    source: D,
}

impl<D: DefinitionSource> Glossary<D> {
    /// Open the cache at `path`, tolerating a missing or corrupt file (a
    /// corrupt cache is discarded with a warning and rebuilt over time).
    pub fn open(path: PathBuf, source: D) -> Self {
        let cache = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(cache) => cache,
                Err(e) => {
                    log::warn!("definition cache {} unreadable ({e}), starting fresh", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        if !cache.is_empty() {
            log::info!("loaded {} cached definitions", cache.len());
        }
        Glossary { cache, path, source }
    }

    /// Resolve a word to its definition.
    ///
    /// Cache hits (positive or negative) return without a remote call. On a
    /// miss the outcome is cached and persisted before returning; service
    /// errors become negative entries so a permanently-unresolvable word is
    /// not retried within or across sessions.
    pub fn resolve(&mut self, word: &str) -> Option<String> {
        if let Some(hit) = self.cache.get(word) {
            return match hit {
                Definition::Found(definition) => Some(definition.clone()),
                Definition::NotFound => None,
            };
        }

        let outcome = match self.source.lookup(word) {
            Ok(Some(definition)) => Definition::Found(definition),
            Ok(None) => Definition::NotFound,
            Err(e) => {
                log::warn!("lookup failed for '{word}': {e}");
                Definition::NotFound
            }
        };

        self.cache.insert(word.to_string(), outcome.clone());
        if let Err(e) = self.save() {
            log::warn!("could not persist definition cache: {e}");
        }

        match outcome {
            Definition::Found(definition) => Some(definition),
            Definition::NotFound => None,
        }
    }

    /// Cached state for a word, without triggering a remote call.
    pub fn cached(&self, word: &str) -> Option<&Definition> {
        self.cache.get(word)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn save(&self) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| EngineError::store(parent, e))?;
        }
        let json = serde_json::to_string_pretty(&self.cache)
            .map_err(|e| EngineError::store(&self.path, e.into()))?;
        fs::write(&self.path, json).map_err(|e| EngineError::store(&self.path, e))
    }
}
