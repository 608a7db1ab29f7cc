// Copyright 2025-present Bunrei Contributors
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a graded sentence index.
//!
//! These types define how tiers, scored sentences, and difficult-word
//! annotations fit together. Everything downstream (scoring, ranking,
//! annotation) speaks in these terms.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Tier**: the derived `Ord` follows declaration order, so
//!   `Tier::N5 < Tier::N1`. Classification and ranking both depend on this.
//! - **TierDistribution**: every element is in `[0, 1]`; the elements sum to
//!   1 (within floating-point tolerance) when the sentence had at least one
//!   word, and are all zero otherwise.
//! - **ScoredSentence**: `unclassified` preserves occurrence order and keeps
//!   duplicates; deduplication happens later, in annotation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// JLPT proficiency tier, ordered from easiest (N5) to hardest (N1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl Tier {
    /// All tiers in ascending difficulty order. Classification walks this
    /// array front to back, so novice lists shadow advanced ones for words
    /// that appear in both.
    pub const ALL: [Tier; 5] = [Tier::N5, Tier::N4, Tier::N3, Tier::N2, Tier::N1];

    /// Index of this tier in a five-element distribution vector: N5 → 0, N1 → 4.
    #[inline]
    pub fn bucket(self) -> usize {
        self as usize
    }

    /// Inverse of [`Tier::bucket`].
    pub fn from_bucket(bucket: usize) -> Option<Self> {
        Self::ALL.get(bucket).copied()
    }

    /// Parse a tier label like `"N3"` or `"n3"`. Unrecognized labels yield
    /// `None`; callers at the API edge turn that into an empty result rather
    /// than an error.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "N5" => Some(Tier::N5),
            "N4" => Some(Tier::N4),
            "N3" => Some(Tier::N3),
            "N2" => Some(Tier::N2),
            "N1" => Some(Tier::N1),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::N5 => "N5",
            Tier::N4 => "N4",
            Tier::N3 => "N3",
            Tier::N2 => "N2",
            Tier::N1 => "N1",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a word sits relative to the tier lists.
///
/// Words found in no tier list at all are labeled [`WordLevel::OutsideTiers`]
/// and only surface in annotations when the external glossary resolves a
/// definition for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordLevel {
    Tier(Tier),
    OutsideTiers,
}

impl WordLevel {
    /// Is this level strictly harder than the learner's tier? Words outside
    /// all tiers count as harder than everything.
    pub fn is_above(self, learner: Tier) -> bool {
        match self {
            WordLevel::Tier(tier) => tier > learner,
            WordLevel::OutsideTiers => true,
        }
    }
}

impl fmt::Display for WordLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordLevel::Tier(tier) => tier.fmt(f),
            WordLevel::OutsideTiers => f.write_str("Outside JLPT"),
        }
    }
}

/// Normalized share of a sentence's words per tier, indexed by
/// [`Tier::bucket`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierDistribution(pub [f64; 5]);

impl TierDistribution {
    #[inline]
    pub fn get(&self, bucket: usize) -> f64 {
        self.0[bucket]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl From<[f64; 5]> for TierDistribution {
    fn from(buckets: [f64; 5]) -> Self {
        TierDistribution(buckets)
    }
}

/// A sentence with its vocabulary profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSentence {
    pub text: String,
    pub distribution: TierDistribution,
    /// Dictionary forms found in none of the tier lists, in occurrence
    /// order, duplicates included.
    pub unclassified: Vec<String>,
    /// Total number of segmented words, classified or not.
    pub word_count: usize,
}

/// A word judged harder than the learner's tier, with its resolved meaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultWord {
    pub word: String,
    pub level: WordLevel,
    pub meaning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_order_ascends_from_n5_to_n1() {
        assert!(Tier::N5 < Tier::N4);
        assert!(Tier::N4 < Tier::N3);
        assert!(Tier::N3 < Tier::N2);
        assert!(Tier::N2 < Tier::N1);
    }

    #[test]
    fn bucket_round_trips() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_bucket(tier.bucket()), Some(tier));
        }
        assert_eq!(Tier::from_bucket(5), None);
    }

    #[test]
    fn parse_accepts_any_case_and_rejects_garbage() {
        assert_eq!(Tier::parse("N3"), Some(Tier::N3));
        assert_eq!(Tier::parse("n1"), Some(Tier::N1));
        assert_eq!(Tier::parse(" n5 "), Some(Tier::N5));
        assert_eq!(Tier::parse("N6"), None);
        assert_eq!(Tier::parse(""), None);
    }

    #[test]
    fn outside_tiers_is_above_every_learner_level() {
        for tier in Tier::ALL {
            assert!(WordLevel::OutsideTiers.is_above(tier));
        }
    }

    #[test]
    fn tier_level_is_above_only_when_strictly_harder() {
        assert!(WordLevel::Tier(Tier::N2).is_above(Tier::N4));
        assert!(!WordLevel::Tier(Tier::N4).is_above(Tier::N4));
        assert!(!WordLevel::Tier(Tier::N5).is_above(Tier::N4));
    }

    #[test]
    fn word_level_display_labels() {
        assert_eq!(WordLevel::Tier(Tier::N1).to_string(), "N1");
        assert_eq!(WordLevel::OutsideTiers.to_string(), "Outside JLPT");
    }
}
