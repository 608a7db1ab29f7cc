// Copyright 2025-present Bunrei Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the bunrei command-line interface.
//!
//! Three subcommands: `ingest` to absorb new source documents into the
//! corpus, `search` to look up a word and rank its example sentences for a
//! learner level, and `stats` to inspect store sizes. All decision logic
//! lives in the library; this layer only parses arguments and prints.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bunrei",
    about = "Graded example-sentence search over a dictionary-form corpus",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the source directory and absorb new documents into the corpus
    Ingest {
        /// Directory of .txt / .tsv source documents
        #[arg(short, long, default_value = "sources")]
        sources: String,

        /// Data directory holding the corpus index, ingest log, and caches
        #[arg(short, long, default_value = "data")]
        data: String,
    },

    /// Look up a word and rank its example sentences for a learner level
    Search {
        /// Seed word (dictionary form)
        word: String,

        /// Learner level: N5, N4, N3, N2, or N1
        #[arg(short, long, default_value = "N5")]
        level: String,

        /// Data directory holding the corpus index, ingest log, and caches
        #[arg(short, long, default_value = "data")]
        data: String,

        /// Maximum number of sentences to display
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show corpus, tier, and cache statistics
    Stats {
        /// Data directory holding the corpus index, ingest log, and caches
        #[arg(short, long, default_value = "data")]
        data: String,
    },
}
