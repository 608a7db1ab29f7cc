// Copyright 2025-present Bunrei Contributors
// SPDX-License-Identifier: Apache-2.0

//! Vocabulary difficulty scoring.
//!
//! A sentence's score is the normalized distribution of its words across
//! the five tiers, plus the words no tier recognizes. Classification is
//! ascending: a word in both N5 and N2 counts as N5.
//!
//! Scoring is pure over read-only state (the tier set and the segmenter),
//! which is why [`DifficultyScorer::score_all`] can fan out over rayon
//! without any coordination.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::segment::Segmenter;
use crate::tiers::TierSet;
use crate::types::{ScoredSentence, TierDistribution};

/// Scores sentences against a fixed tier set.
pub struct DifficultyScorer<'a, S: Segmenter> {
    tiers: &'a TierSet,
    segmenter: &'a S,
}

impl<'a, S: Segmenter> DifficultyScorer<'a, S> {
    pub fn new(tiers: &'a TierSet, segmenter: &'a S) -> Self {
        DifficultyScorer { tiers, segmenter }
    }

    /// Score one sentence.
    ///
    /// Zero-word sentences keep an all-zero distribution; there is no
    /// division by zero, and `word_count` is 0.
    pub fn score(&self, sentence: &str) -> ScoredSentence {
        let words = self.segmenter.dictionary_forms(sentence);
        let mut buckets = [0usize; 5];
        let mut unclassified = Vec::new();

        for word in &words {
            match self.tiers.classify(word) {
                Some((tier, _gloss)) => buckets[tier.bucket()] += 1,
                None => unclassified.push(word.clone()),
            }
        }

        let word_count = words.len();
        let mut distribution = [0.0f64; 5];
        if word_count > 0 {
            for (slot, count) in distribution.iter_mut().zip(buckets) {
                *slot = count as f64 / word_count as f64;
            }
        }

        ScoredSentence {
            text: sentence.to_string(),
            distribution: TierDistribution(distribution),
            unclassified,
            word_count,
        }
    }

    /// Score a batch of sentences in parallel, preserving input order.
    #[cfg(feature = "parallel")]
    pub fn score_all(&self, sentences: &[String]) -> Vec<ScoredSentence>
    where
        S: Sync,
    {
        sentences.par_iter().map(|s| self.score(s)).collect()
    }

    /// Sequential batch scoring for builds without rayon.
    #[cfg(not(feature = "parallel"))]
    pub fn score_all(&self, sentences: &[String]) -> Vec<ScoredSentence> {
        sentences.iter().map(|s| self.score(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mapped_segmenter, tier_fixture};
    use crate::types::Tier;

    #[test]
    fn all_tier1_words_give_unit_first_bucket() {
        let tiers = tier_fixture();
        let segmenter = mapped_segmenter(&[(
            "猫がご飯を食べる。",
            &["猫", "が", "ご飯", "を", "食べる"],
        )]);
        let scorer = DifficultyScorer::new(&tiers, &segmenter);

        let scored = scorer.score("猫がご飯を食べる。");
        assert_eq!(scored.word_count, 5);
        assert!(scored.unclassified.is_empty());
        assert_eq!(scored.distribution.0, [1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn mixed_tiers_normalize_by_word_count() {
        let tiers = TierSet::from_entries([
            (Tier::N5, "a", ""),
            (Tier::N5, "b", ""),
            (Tier::N2, "c", ""),
        ]);
        let segmenter = mapped_segmenter(&[("a b c d", &["a", "b", "c", "d"])]);
        let scorer = DifficultyScorer::new(&tiers, &segmenter);

        let scored = scorer.score("a b c d");
        assert_eq!(scored.distribution.0, [0.5, 0.0, 0.0, 0.25, 0.0]);
        assert_eq!(scored.unclassified, ["d"]);
        assert_eq!(scored.word_count, 4);
    }

    #[test]
    fn empty_sentence_scores_all_zero() {
        let tiers = tier_fixture();
        let segmenter = mapped_segmenter(&[]);
        let scorer = DifficultyScorer::new(&tiers, &segmenter);

        let scored = scorer.score("");
        assert_eq!(scored.word_count, 0);
        assert_eq!(scored.distribution.0, [0.0; 5]);
        assert!(scored.unclassified.is_empty());
    }

    #[test]
    fn unclassified_keeps_duplicates_and_order() {
        let tiers = tier_fixture();
        let segmenter = mapped_segmenter(&[("x y x", &["x", "y", "x"])]);
        let scorer = DifficultyScorer::new(&tiers, &segmenter);

        let scored = scorer.score("x y x");
        assert_eq!(scored.unclassified, ["x", "y", "x"]);
    }

    #[test]
    fn score_all_preserves_input_order() {
        let tiers = tier_fixture();
        let segmenter = mapped_segmenter(&[("a", &["猫"]), ("b", &["宇宙船"])]);
        let scorer = DifficultyScorer::new(&tiers, &segmenter);

        let sentences = vec!["a".to_string(), "b".to_string()];
        let scored = scorer.score_all(&sentences);
        assert_eq!(scored[0].text, "a");
        assert_eq!(scored[1].text, "b");
    }
}
