// Copyright 2025-present Bunrei Contributors
// SPDX-License-Identifier: Apache-2.0

//! Level-aware sentence ranking.
//!
//! The ranking is a descending lexicographic comparison over the five
//! distribution buckets, read in a learner-specific order. The order is a
//! declarative table rather than branchy comparator code, so each tier's
//! rule is independently testable.
//!
//! Bucket read order per learner tier (bucket 0 = N5 .. bucket 4 = N1):
//! the learner's own bucket first, then progressively easier buckets, then
//! the harder ones. Sentences richest in own-level vocabulary surface
//! first; ties break toward vocabulary the learner already knows.

use std::cmp::Ordering;

use crate::types::{ScoredSentence, Tier};

/// The five bucket permutations, indexed by [`Tier::bucket`].
pub const BUCKET_PRIORITY: [[usize; 5]; 5] = [
    [0, 1, 2, 3, 4], // N5
    [1, 0, 2, 3, 4], // N4
    [2, 1, 0, 3, 4], // N3
    [3, 2, 1, 0, 4], // N2
    [4, 3, 2, 1, 0], // N1
];

/// Order scored sentences for a learner tier, best first.
///
/// The sort is stable: sentences with identical distribution vectors keep
/// their relative input order.
pub fn rank(mut sentences: Vec<ScoredSentence>, tier: Tier) -> Vec<ScoredSentence> {
    let priority = &BUCKET_PRIORITY[tier.bucket()];
    sentences.sort_by(|a, b| compare(a, b, priority));
    sentences
}

fn compare(a: &ScoredSentence, b: &ScoredSentence, priority: &[usize; 5]) -> Ordering {
    for &bucket in priority {
        // Descending per bucket. Distributions never contain NaN, so a
        // non-comparable pair is treated as equal and falls through.
        match b
            .distribution
            .get(bucket)
            .partial_cmp(&a.distribution.get(bucket))
        {
            Some(Ordering::Equal) | None => continue,
            Some(ord) => return ord,
        }
    }
    Ordering::Equal
}
