//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid
//! duplication: a table-driven segmenter standing in for a real
//! morphological analyzer, a scripted definition source with call counting,
//! and a small tier fixture.

#![doc(hidden)]

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::EngineError;
use crate::glossary::DefinitionSource;
use crate::segment::{BasicSegmenter, Segmenter, Token};
use crate::tiers::TierSet;
use crate::types::Tier;

/// Segmenter driven by an explicit text → dictionary-forms table.
///
/// Texts absent from the table fall back to [`BasicSegmenter`], so
/// space-delimited test corpora work without enumerating every sentence.
pub struct MappedSegmenter {
    table: HashMap<String, Vec<String>>,
}

impl Segmenter for MappedSegmenter {
    fn segment(&self, text: &str) -> Vec<Token> {
        match self.table.get(text) {
            Some(forms) => {
                let mut start = 0;
                forms
                    .iter()
                    .map(|form| {
                        let token = Token {
                            surface: form.clone(),
                            dictionary_form: form.clone(),
                            start,
                            len: form.len(),
                        };
                        start += form.len();
                        token
                    })
                    .collect()
            }
            None => BasicSegmenter.segment(text),
        }
    }
}

/// Build a [`MappedSegmenter`] from `(text, dictionary forms)` pairs.
pub fn mapped_segmenter(entries: &[(&str, &[&str])]) -> MappedSegmenter {
    let table = entries
        .iter()
        .map(|(text, forms)| {
            (
                (*text).to_string(),
                forms.iter().map(|f| (*f).to_string()).collect(),
            )
        })
        .collect();
    MappedSegmenter { table }
}

/// The canonical tier fixture used by scoring and annotation tests.
pub fn tier_fixture() -> TierSet {
    TierSet::from_entries([
        (Tier::N5, "猫", "cat"),
        (Tier::N5, "が", "subject particle"),
        (Tier::N5, "ご飯", "cooked rice; meal"),
        (Tier::N5, "を", "object particle"),
        (Tier::N5, "食べる", "to eat"),
        (Tier::N5, "彼", "he"),
        (Tier::N5, "は", "topic particle"),
        (Tier::N3, "寿司", "sushi"),
        (Tier::N4, "操縦する", "to pilot; to steer"),
    ])
}

/// Definition source with a fixed script and a shared call counter.
///
/// `Ok(None)` for unknown words, or `Err` for every call when built with
/// [`ScriptedSource::failing`].
pub struct ScriptedSource {
    definitions: HashMap<String, String>,
    fail: bool,
    calls: Rc<Cell<usize>>,
}

impl ScriptedSource {
    pub fn empty() -> Self {
        Self::with_definitions(&[])
    }

    pub fn with_definition(word: &str, definition: &str) -> Self {
        Self::with_definitions(&[(word, definition)])
    }

    pub fn with_definitions(entries: &[(&str, &str)]) -> Self {
        ScriptedSource {
            definitions: entries
                .iter()
                .map(|(w, d)| ((*w).to_string(), (*d).to_string()))
                .collect(),
            fail: false,
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn failing() -> Self {
        ScriptedSource {
            definitions: HashMap::new(),
            fail: true,
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Handle onto the remote-call counter; stays valid after the source
    /// moves into a glossary.
    pub fn call_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl DefinitionSource for ScriptedSource {
    fn lookup(&mut self, word: &str) -> Result<Option<String>, EngineError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(EngineError::Lookup("scripted failure".to_string()));
        }
        Ok(self.definitions.get(word).cloned())
    }
}
