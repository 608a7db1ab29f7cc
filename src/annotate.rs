// Copyright 2025-present Bunrei Contributors
// SPDX-License-Identifier: Apache-2.0

//! Difficult-word annotation.
//!
//! For a sentence and a learner tier, collect every word strictly above
//! that tier: tier-listed words harder than the learner, and words outside
//! all tiers whose definition the glossary can resolve. Out-of-tier words
//! that resolve to nothing are omitted from the result.

use std::collections::HashSet;

use crate::glossary::{DefinitionSource, Glossary};
use crate::segment::Segmenter;
use crate::tiers::TierSet;
use crate::types::{DifficultWord, Tier, WordLevel};

/// Annotate a sentence for a learner tier.
///
/// Each distinct word is considered once (first occurrence wins). Tier
/// classification is the same ascending search scoring uses, so a word
/// never annotates under a harder tier than it scores under.
pub fn annotate<S, D>(
    sentence: &str,
    learner: Tier,
    tiers: &TierSet,
    segmenter: &S,
    glossary: &mut Glossary<D>,
) -> Vec<DifficultWord>
where
    S: Segmenter + ?Sized,
    D: DefinitionSource,
{
    let mut annotations = Vec::new();
    let mut seen = HashSet::new();

    for word in segmenter.dictionary_forms(sentence) {
        if !seen.insert(word.clone()) {
            continue;
        }

        match tiers.classify(&word) {
            Some((tier, gloss)) => {
                if tier > learner {
                    annotations.push(DifficultWord {
                        word,
                        level: WordLevel::Tier(tier),
                        meaning: gloss.to_string(),
                    });
                }
            }
            None => {
                if let Some(definition) = glossary.resolve(&word) {
                    annotations.push(DifficultWord {
                        word,
                        level: WordLevel::OutsideTiers,
                        meaning: definition,
                    });
                }
            }
        }
    }

    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glossary::Definition;
    use crate::testing::{mapped_segmenter, tier_fixture, ScriptedSource};

    fn open_glossary(
        dir: &tempfile::TempDir,
        source: ScriptedSource,
    ) -> Glossary<ScriptedSource> {
        Glossary::open(dir.path().join("definitions.json"), source)
    }

    #[test]
    fn words_above_learner_tier_carry_label_and_gloss() {
        let tiers = tier_fixture();
        let segmenter = mapped_segmenter(&[(
            "彼は宇宙船を操縦する。",
            &["彼", "は", "宇宙船", "を", "操縦する"],
        )]);
        let dir = tempfile::tempdir().unwrap();
        let mut glossary = open_glossary(&dir, ScriptedSource::with_definition("宇宙船", "spaceship"));

        let annotations = annotate(
            "彼は宇宙船を操縦する。",
            Tier::N5,
            &tiers,
            &segmenter,
            &mut glossary,
        );

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].word, "宇宙船");
        assert_eq!(annotations[0].level, WordLevel::OutsideTiers);
        assert_eq!(annotations[0].meaning, "spaceship");
        assert_eq!(annotations[1].word, "操縦する");
        assert_eq!(annotations[1].level, WordLevel::Tier(Tier::N4));
    }

    #[test]
    fn words_at_or_below_learner_tier_are_skipped() {
        let tiers = tier_fixture();
        let segmenter = mapped_segmenter(&[("猫が食べる", &["猫", "が", "食べる"])]);
        let dir = tempfile::tempdir().unwrap();
        let mut glossary = open_glossary(&dir, ScriptedSource::empty());

        let annotations = annotate("猫が食べる", Tier::N5, &tiers, &segmenter, &mut glossary);
        assert!(annotations.is_empty());
    }

    #[test]
    fn duplicates_annotate_once() {
        let tiers = tier_fixture();
        let segmenter = mapped_segmenter(&[("x x x", &["操縦する", "操縦する", "操縦する"])]);
        let dir = tempfile::tempdir().unwrap();
        let mut glossary = open_glossary(&dir, ScriptedSource::empty());

        let annotations = annotate("x x x", Tier::N5, &tiers, &segmenter, &mut glossary);
        assert_eq!(annotations.len(), 1);
    }

    #[test]
    fn unresolved_out_of_tier_words_are_omitted_but_cached() {
        let tiers = tier_fixture();
        let segmenter = mapped_segmenter(&[("?", &["謎語"])]);
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptedSource::empty();
        let calls = source.call_counter();
        let mut glossary = open_glossary(&dir, source);

        let annotations = annotate("?", Tier::N1, &tiers, &segmenter, &mut glossary);
        assert!(annotations.is_empty());
        assert_eq!(calls.get(), 1);
        assert_eq!(glossary.cached("謎語"), Some(&Definition::NotFound));
    }
}
