// Copyright 2025-present Bunrei Contributors
// SPDX-License-Identifier: Apache-2.0

//! The engine wires the stores and the collaborators together.
//!
//! One instance owns the read-only tier set, the corpus index, and the
//! glossary. The corpus and glossary are the only mutable stores; each sits
//! behind its own single-writer lock, so concurrent presentation-layer
//! requests that trigger ingestion or resolution serialize per store.
//! Readers take a snapshot under the corpus lock and release it before
//! scoring, which keeps the lock hold time proportional to the sentence
//! list, not the request.

use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use crate::annotate::annotate;
use crate::corpus::CorpusIndex;
use crate::error::EngineError;
use crate::glossary::{DefinitionSource, Glossary};
use crate::ranking::rank;
use crate::scoring::DifficultyScorer;
use crate::segment::Segmenter;
use crate::tiers::TierSet;
use crate::types::{DifficultWord, ScoredSentence, Tier};

const CACHE_FILE: &str = "definition_cache.json";

/// A ranked sentence together with its difficult-word annotations.
#[derive(Debug, Clone)]
pub struct RankedSentence {
    pub scored: ScoredSentence,
    pub difficult_words: Vec<DifficultWord>,
}

/// Successful lookup: the seed word's definition and its example sentences,
/// best match for the learner first.
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub definition: Option<String>,
    pub sentences: Vec<RankedSentence>,
}

/// What a presentation layer gets back from a labeled lookup.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    Found(LookupResult),
    /// Seed word absent from the corpus. A result, not an error.
    WordNotFound,
    /// Unrecognized learner level label; degraded to an empty outcome.
    UnknownLevel,
}

/// Store sizes, for diagnostics and the `stats` subcommand.
#[derive(Debug, Clone, Copy)]
pub struct EngineStats {
    pub indexed_words: usize,
    pub sentence_refs: usize,
    pub ingested_sources: usize,
    pub cached_definitions: usize,
    pub tier_words: usize,
}

pub struct Engine<S, D> {
    tiers: TierSet,
    segmenter: S,
    corpus: RwLock<CorpusIndex>,
    glossary: Mutex<Glossary<D>>,
    source_dir: PathBuf,
}

impl<S: Segmenter, D: DefinitionSource> Engine<S, D> {
    pub fn new(
        tiers: TierSet,
        segmenter: S,
        corpus: CorpusIndex,
        glossary: Glossary<D>,
        source_dir: PathBuf,
    ) -> Self {
        Engine {
            tiers,
            segmenter,
            corpus: RwLock::new(corpus),
            glossary: Mutex::new(glossary),
            source_dir,
        }
    }

    /// Open the stores under `data_dir` and watch `source_dir` for corpus
    /// documents.
    pub fn open(
        data_dir: &Path,
        source_dir: &Path,
        tiers: TierSet,
        segmenter: S,
        source: D,
    ) -> Result<Self, EngineError> {
        let corpus = CorpusIndex::open(data_dir)?;
        let glossary = Glossary::open(data_dir.join(CACHE_FILE), source);
        Ok(Engine::new(
            tiers,
            segmenter,
            corpus,
            glossary,
            source_dir.to_path_buf(),
        ))
    }

    /// Scan the source directory and absorb any new documents. Returns the
    /// ids of newly ingested sources.
    pub fn ingest_new_sources(&self) -> Result<Vec<String>, EngineError> {
        self.corpus
            .write()
            .scan_sources(&self.source_dir, &self.segmenter)
    }

    /// Look up a seed word: definition plus ranked, annotated example
    /// sentences. `None` when the corpus has no sentences for the word.
    ///
    /// The seed itself is excluded from every sentence's annotations; the
    /// caller already asked about that word.
    pub fn lookup(&self, seed: &str, learner: Tier) -> Option<LookupResult> {
        let sentences: Vec<String> = {
            let corpus = self.corpus.read();
            corpus.sentences(seed)?.to_vec()
        };

        let scorer = DifficultyScorer::new(&self.tiers, &self.segmenter);
        let scored: Vec<ScoredSentence> = sentences.iter().map(|s| scorer.score(s)).collect();
        let ranked = rank(scored, learner);

        let mut glossary = self.glossary.lock();

        let definition = match self.tiers.classify(seed) {
            Some((_, gloss)) => Some(gloss.to_string()),
            None => glossary.resolve(seed),
        };

        let sentences = ranked
            .into_iter()
            .map(|scored| {
                let mut difficult_words = annotate(
                    &scored.text,
                    learner,
                    &self.tiers,
                    &self.segmenter,
                    &mut glossary,
                );
                difficult_words.retain(|w| w.word != seed);
                RankedSentence {
                    scored,
                    difficult_words,
                }
            })
            .collect();

        Some(LookupResult {
            definition,
            sentences,
        })
    }

    /// Label-taking variant for presentation layers. A bad label is a
    /// degraded outcome, never a failure.
    pub fn lookup_labeled(&self, seed: &str, level_label: &str) -> LookupOutcome {
        let Some(learner) = Tier::parse(level_label) else {
            log::warn!("unrecognized level label '{level_label}'");
            return LookupOutcome::UnknownLevel;
        };
        match self.lookup(seed, learner) {
            Some(result) => LookupOutcome::Found(result),
            None => LookupOutcome::WordNotFound,
        }
    }

    pub fn stats(&self) -> EngineStats {
        let corpus = self.corpus.read();
        EngineStats {
            indexed_words: corpus.word_count(),
            sentence_refs: corpus.sentence_refs(),
            ingested_sources: corpus.ingested_sources().count(),
            cached_definitions: self.glossary.lock().len(),
            tier_words: self.tiers.len(),
        }
    }
}
