// Copyright 2025-present Bunrei Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the indexing and lookup engine.
//!
//! None of these terminate a running process. Ingestion errors skip the
//! offending source (and leave it unlogged, so the next scan retries it),
//! lookup errors degrade to a negative cache entry, and store errors are
//! reported to the caller who decides whether the write matters.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A source document could not be read. The source is not marked
    /// ingested, so the next scan retries it.
    #[error("failed to read source '{source_id}': {source}")]
    Ingest {
        source_id: String,
        #[source]
        source: io::Error,
    },

    /// Corpus or cache store I/O failed.
    #[error("store I/O at {}: {source}", .path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The definition service misbehaved: transport failure, non-success
    /// status, or a body that did not parse.
    #[error("definition service: {0}")]
    Lookup(String),
}

impl EngineError {
    pub(crate) fn store(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EngineError::Store {
            path: path.into(),
            source,
        }
    }
}
