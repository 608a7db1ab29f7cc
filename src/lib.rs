//! Graded example-sentence search.
//!
//! This crate indexes a corpus of example sentences by the dictionary form
//! of every word they contain, then ranks retrieved sentences by how well
//! their vocabulary matches a learner's JLPT level.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ corpus.rs  │───▶│ scoring.rs  │───▶│ ranking.rs  │
//! │ (word →    │    │ (tier dist- │    │ (per-level  │
//! │ sentences) │    │  ribution)  │    │ bucket order)│
//! └────────────┘    └─────────────┘    └─────────────┘
//!       │                  │                  │
//!       ▼                  ▼                  ▼
//! ┌─────────────────────────────────────────────────┐
//! │                   engine.rs                      │
//! │   lookup(word, level) → definition + ranked,     │
//! │   annotated sentences (annotate.rs, glossary.rs) │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The morphological analyzer and the remote dictionary are collaborators
//! behind the [`Segmenter`] and [`DefinitionSource`] traits; everything
//! else is owned state with an explicit lifecycle (load at startup, flush
//! on mutation).
//!
//! # Usage
//!
//! ```ignore
//! use bunrei::{BasicSegmenter, Engine, JishoClient, Tier, TierSet};
//!
//! let tiers = TierSet::load_dir(Path::new("data/tiers"));
//! let engine = Engine::open(data_dir, source_dir, tiers, BasicSegmenter, JishoClient::new()?)?;
//! engine.ingest_new_sources()?;
//!
//! if let Some(result) = engine.lookup("食べる", Tier::N4) {
//!     // result.sentences is ranked best-first for an N4 learner
//! }
//! ```

// Module declarations
mod annotate;
mod corpus;
mod engine;
mod error;
mod glossary;
mod ranking;
mod scoring;
mod segment;
pub mod testing;
mod tiers;
mod types;

// Re-exports for public API
pub use annotate::annotate;
pub use corpus::{split_sentences, CorpusIndex};
pub use engine::{Engine, EngineStats, LookupOutcome, LookupResult, RankedSentence};
pub use error::EngineError;
pub use glossary::{Definition, DefinitionSource, Glossary, JishoClient, DEFAULT_ENDPOINT};
pub use ranking::{rank, BUCKET_PRIORITY};
pub use scoring::DifficultyScorer;
pub use segment::{fold, token_at, BasicSegmenter, Segmenter, Token};
pub use tiers::{TierIndex, TierSet};
pub use types::{DifficultWord, ScoredSentence, Tier, TierDistribution, WordLevel};
