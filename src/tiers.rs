// Copyright 2025-present Bunrei Contributors
// SPDX-License-Identifier: Apache-2.0

//! Static vocabulary lists, one per proficiency tier.
//!
//! A [`TierSet`] is built once at startup and never mutated afterwards,
//! which is what makes read-side sharing (parallel scoring, concurrent
//! lookups) trivially safe.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **ASCENDING_LOOKUP**: [`TierSet::classify`] checks N5 first and N1
//!    last. A word listed in two tiers scores under the easier one.
//! 2. **READ_ONLY**: no insertion API exists after construction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::types::Tier;

/// Word → gloss mapping for a single tier.
#[derive(Debug, Clone, Default)]
pub struct TierIndex {
    entries: HashMap<String, String>,
}

impl TierIndex {
    pub fn new(entries: HashMap<String, String>) -> Self {
        TierIndex { entries }
    }

    pub fn gloss(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a tab-separated vocabulary list: `word<TAB>gloss` per line.
    /// Blank lines and `#` comments are skipped; a line without a tab is a
    /// word with an empty gloss.
    fn parse_tsv(content: &str) -> Self {
        let mut entries = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((word, gloss)) => {
                    entries.insert(word.trim().to_string(), gloss.trim().to_string());
                }
                None => {
                    entries.insert(line.to_string(), String::new());
                }
            }
        }
        TierIndex { entries }
    }
}

/// All five tier indexes, addressable by [`Tier`].
#[derive(Debug, Clone, Default)]
pub struct TierSet {
    indexes: [TierIndex; 5],
}

impl TierSet {
    pub fn new(indexes: [TierIndex; 5]) -> Self {
        TierSet { indexes }
    }

    /// Build from `(tier, word, gloss)` triples. Mostly a test convenience.
    pub fn from_entries<I, W, G>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Tier, W, G)>,
        W: Into<String>,
        G: Into<String>,
    {
        let mut maps: [HashMap<String, String>; 5] = Default::default();
        for (tier, word, gloss) in entries {
            maps[tier.bucket()].insert(word.into(), gloss.into());
        }
        TierSet {
            indexes: maps.map(TierIndex::new),
        }
    }

    /// Load `n5.tsv` .. `n1.tsv` from a directory. A missing or unreadable
    /// file leaves that tier empty with a warning; classification still
    /// works against the others.
    pub fn load_dir(dir: &Path) -> Self {
        let indexes = Tier::ALL.map(|tier| {
            let path = dir.join(format!("{}.tsv", tier.label().to_lowercase()));
            match fs::read_to_string(&path) {
                Ok(content) => {
                    let index = TierIndex::parse_tsv(&content);
                    log::info!("loaded {} {} words from {}", index.len(), tier, path.display());
                    index
                }
                Err(e) => {
                    log::warn!("tier list {} unavailable: {e}", path.display());
                    TierIndex::default()
                }
            }
        });
        TierSet { indexes }
    }

    pub fn index(&self, tier: Tier) -> &TierIndex {
        &self.indexes[tier.bucket()]
    }

    /// Find a word's tier and gloss, checking easiest tiers first.
    pub fn classify(&self, word: &str) -> Option<(Tier, &str)> {
        for tier in Tier::ALL {
            if let Some(gloss) = self.indexes[tier.bucket()].gloss(word) {
                return Some((tier, gloss));
            }
        }
        None
    }

    /// Total words across all five tiers.
    pub fn len(&self) -> usize {
        self.indexes.iter().map(TierIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.iter().all(TierIndex::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_returns_tier_and_gloss() {
        let tiers = TierSet::from_entries([
            (Tier::N5, "猫", "cat"),
            (Tier::N1, "操縦", "steering, piloting"),
        ]);
        assert_eq!(tiers.classify("猫"), Some((Tier::N5, "cat")));
        assert_eq!(tiers.classify("操縦"), Some((Tier::N1, "steering, piloting")));
        assert_eq!(tiers.classify("宇宙船"), None);
    }

    #[test]
    fn lowest_tier_wins_on_collision() {
        let tiers = TierSet::from_entries([
            (Tier::N1, "いる", "to need"),
            (Tier::N5, "いる", "to exist"),
        ]);
        assert_eq!(tiers.classify("いる"), Some((Tier::N5, "to exist")));
    }

    #[test]
    fn parse_tsv_skips_comments_and_blanks() {
        let index = TierIndex::parse_tsv("# header\n\n食べる\tto eat\n飲む\tto drink\n");
        assert_eq!(index.len(), 2);
        assert_eq!(index.gloss("食べる"), Some("to eat"));
    }

    #[test]
    fn parse_tsv_allows_glossless_words() {
        let index = TierIndex::parse_tsv("走る\n");
        assert_eq!(index.gloss("走る"), Some(""));
    }

    #[test]
    fn load_dir_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("n5.tsv"), "猫\tcat\n").unwrap();
        let tiers = TierSet::load_dir(dir.path());
        assert_eq!(tiers.classify("猫"), Some((Tier::N5, "cat")));
        assert_eq!(tiers.len(), 1);
    }
}
