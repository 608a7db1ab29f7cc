// Copyright 2025-present Bunrei Contributors
// SPDX-License-Identifier: Apache-2.0

//! The example-sentence corpus: word → sentence-list index.
//!
//! Sources are plain-text files (sentence per `。！？` boundary or line) and
//! Tatoeba-style TSV exports. Each segment runs through the external
//! segmenter; every distinct dictionary form gains the sentence in its list.
//!
//! Persistence is one line per word, `word|<JSON array of sentences>`. The
//! JSON escaping is what makes the round-trip lossless: sentences may
//! contain pipes, brackets, quotes, anything. Loading splits on the first
//! pipe only, so the word key is the only thing that must stay pipe-free
//! (segmenter output always is).
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **NO_EMPTY_SENTENCES**: empty segments are discarded before indexing.
//! 2. **DEDUP_BY_EQUALITY**: a sentence is appended to a word's list only if
//!    the exact string is not already present.
//! 3. **INGEST_ONCE**: a source id in the ingest log is never processed
//!    again; ids are logged only after the whole source was absorbed.

use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::EngineError;
use crate::segment::Segmenter;

const INDEX_FILE: &str = "corpus_index.txt";
const LOG_FILE: &str = "ingested_sources.txt";

/// Split a line of running text into sentence units.
///
/// Boundaries are the sentence-final marks `。！？` (kept attached to their
/// sentence) and line breaks. Empty units are dropped later, after trimming.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut units = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        match ch {
            '。' | '！' | '？' => {
                current.push(ch);
                units.push(std::mem::take(&mut current));
            }
            '\n' => units.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        units.push(current);
    }
    units
}

/// Pick the sentence column out of a TSV row.
///
/// Tatoeba exports are `id<TAB>lang<TAB>sentence`, so the sentence is the
/// last column whether or not the language column is present. Rows with a
/// single column carry no sentence.
fn tsv_sentence(row: &str) -> Option<&str> {
    let mut columns = row.split('\t');
    let _id = columns.next();
    columns.last()
}

/// The word → sentences index, with its ingest log and on-disk home.
///
/// Mutated only by the ingestion path; the engine serializes access behind a
/// single-writer lock. In-memory state is append-only: sentences and words
/// are never removed.
#[derive(Debug)]
pub struct CorpusIndex {
    entries: HashMap<String, Vec<String>>,
    ingested: HashSet<String>,
    index_path: PathBuf,
    log_path: PathBuf,
}

impl CorpusIndex {
    /// Open (or create) the corpus stored under `data_dir`, replaying the
    /// persisted index and ingest log. Malformed index lines are skipped
    /// with a warning rather than failing the load.
    pub fn open(data_dir: &Path) -> Result<Self, EngineError> {
        fs::create_dir_all(data_dir).map_err(|e| EngineError::store(data_dir, e))?;
        let mut corpus = CorpusIndex {
            entries: HashMap::new(),
            ingested: HashSet::new(),
            index_path: data_dir.join(INDEX_FILE),
            log_path: data_dir.join(LOG_FILE),
        };
        corpus.load_index()?;
        corpus.load_log()?;
        Ok(corpus)
    }

    fn load_index(&mut self) -> Result<(), EngineError> {
        let content = match fs::read_to_string(&self.index_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(EngineError::store(&self.index_path, e)),
        };
        for (line_no, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let Some((word, sentences_json)) = line.split_once('|') else {
                log::warn!("corpus index line {}: missing separator, skipped", line_no + 1);
                continue;
            };
            match serde_json::from_str::<Vec<String>>(sentences_json) {
                Ok(sentences) => {
                    self.entries.insert(word.to_string(), sentences);
                }
                Err(e) => {
                    log::warn!("corpus index line {}: bad sentence list ({e}), skipped", line_no + 1);
                }
            }
        }
        Ok(())
    }

    fn load_log(&mut self) -> Result<(), EngineError> {
        let content = match fs::read_to_string(&self.log_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(EngineError::store(&self.log_path, e)),
        };
        self.ingested
            .extend(content.lines().filter(|l| !l.is_empty()).map(String::from));
        Ok(())
    }

    /// Rewrite the whole index file. Words are emitted in sorted order so
    /// the file is diffable and saves are deterministic.
    pub fn save(&self) -> Result<(), EngineError> {
        let mut words: Vec<&String> = self.entries.keys().collect();
        words.sort();

        let mut out = String::new();
        for word in words {
            let sentences = serde_json::to_string(&self.entries[word])
                .map_err(|e| EngineError::store(&self.index_path, e.into()))?;
            out.push_str(word);
            out.push('|');
            out.push_str(&sentences);
            out.push('\n');
        }
        fs::write(&self.index_path, out).map_err(|e| EngineError::store(&self.index_path, e))
    }

    /// Ordered example sentences for a dictionary-form word.
    pub fn sentences(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn is_ingested(&self, source_id: &str) -> bool {
        self.ingested.contains(source_id)
    }

    /// Number of distinct indexed words.
    pub fn word_count(&self) -> usize {
        self.entries.len()
    }

    /// All indexed words, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored sentence references (a sentence under two words
    /// counts twice).
    pub fn sentence_refs(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn ingested_sources(&self) -> impl Iterator<Item = &str> {
        self.ingested.iter().map(String::as_str)
    }

    /// Absorb one source document. Does nothing if the id is already in the
    /// ingest log. The id is logged only after every segment was processed;
    /// a read failure leaves the source unlogged for the next scan. The
    /// index is NOT saved here; callers batch saves across a scan.
    pub fn ingest_source<S: Segmenter + ?Sized>(
        &mut self,
        source_id: &str,
        path: &Path,
        segmenter: &S,
    ) -> Result<(), EngineError> {
        if self.is_ingested(source_id) {
            return Ok(());
        }

        let content = fs::read_to_string(path).map_err(|e| EngineError::Ingest {
            source_id: source_id.to_string(),
            source: e,
        })?;

        if source_id.ends_with(".tsv") {
            for row in content.lines() {
                if let Some(sentence) = tsv_sentence(row) {
                    self.absorb_segment(sentence, segmenter);
                }
            }
        } else {
            for unit in split_sentences(&content) {
                self.absorb_segment(&unit, segmenter);
            }
        }

        self.mark_ingested(source_id)
    }

    /// Index a single sentence unit under every distinct dictionary form it
    /// contains.
    fn absorb_segment<S: Segmenter + ?Sized>(&mut self, segment: &str, segmenter: &S) {
        let sentence = segment.replace('\u{3000}', "");
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return;
        }

        let mut seen = HashSet::new();
        for word in segmenter.dictionary_forms(sentence) {
            if !seen.insert(word.clone()) {
                continue;
            }
            let list = self.entries.entry(word).or_default();
            if !list.iter().any(|s| s == sentence) {
                list.push(sentence.to_string());
            }
        }
    }

    fn mark_ingested(&mut self, source_id: &str) -> Result<(), EngineError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| EngineError::store(&self.log_path, e))?;
        writeln!(file, "{source_id}").map_err(|e| EngineError::store(&self.log_path, e))?;
        self.ingested.insert(source_id.to_string());
        Ok(())
    }

    /// Scan a directory for `.txt`/`.tsv` sources and absorb the new ones.
    ///
    /// A missing directory is created, not fatal. An unreadable source is
    /// logged and skipped; the rest of the scan continues. The index is
    /// saved once at the end, and only if something new was absorbed.
    /// Returns the ids of newly ingested sources, in scan order.
    pub fn scan_sources<S: Segmenter + ?Sized>(
        &mut self,
        source_dir: &Path,
        segmenter: &S,
    ) -> Result<Vec<String>, EngineError> {
        fs::create_dir_all(source_dir).map_err(|e| EngineError::store(source_dir, e))?;

        let mut candidates: Vec<(String, PathBuf)> = fs::read_dir(source_dir)
            .map_err(|e| EngineError::store(source_dir, e))?
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                (name.ends_with(".txt") || name.ends_with(".tsv"))
                    .then(|| (name, entry.path()))
            })
            .collect();
        candidates.sort();

        #[cfg(feature = "parallel")]
        let progress = scan_progress(candidates.len() as u64);

        let mut added = Vec::new();
        for (source_id, path) in candidates {
            #[cfg(feature = "parallel")]
            progress.set_message(source_id.clone());

            if !self.is_ingested(&source_id) {
                match self.ingest_source(&source_id, &path, segmenter) {
                    Ok(()) => added.push(source_id),
                    Err(e) => log::warn!("skipping source: {e}"),
                }
            }

            #[cfg(feature = "parallel")]
            progress.inc(1);
        }

        #[cfg(feature = "parallel")]
        progress.finish_and_clear();

        if !added.is_empty() {
            self.save()?;
            log::info!("ingested {} new sources, {} words indexed", added.len(), self.word_count());
        }
        Ok(added)
    }
}

#[cfg(feature = "parallel")]
fn scan_progress(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("━━╸"),
    );
    progress.set_prefix("Ingesting");
    progress
}
