//! Per-thread lexical statistics over normalized token streams.

use crate::text;
use ahash::{AHashMap, AHashSet};

/// Distinct-to-total token ratio for one thread's comments.
///
/// Exact-duplicate comments are collapsed before tokenization so bot
/// reposts and quote chains do not drag the ratio down. Tokens come from
/// the normalizer with stopwords removed and no stemming. A thread with no
/// tokens scores 0.0; empty threads are valid data, not errors.
pub fn lexical_diversity(comments: &[String]) -> f64 {
    let mut seen = AHashSet::new();
    let mut distinct = AHashSet::new();
    let mut total = 0usize;
    for comment in comments {
        if !seen.insert(comment.as_str()) {
            continue;
        }
        for token in text::normalize(comment, true, false) {
            total += 1;
            distinct.insert(token);
        }
    }
    if total == 0 {
        return 0.0;
    }
    distinct.len() as f64 / total as f64
}

/// Occurrence counts per distinct normalized token (stopwords removed, no
/// stemming) over the whole comment set. Counts are order independent.
pub fn frequency_distribution(comments: &[String]) -> AHashMap<String, u64> {
    let mut counts = AHashMap::new();
    for comment in comments {
        for token in text::normalize(comment, true, false) {
            *counts.entry(token).or_insert(0u64) += 1;
        }
    }
    counts
}

/// Cumulative share of total occurrences covered by the top-ranked words.
/// Entry `i` is the fraction of all occurrences covered by the `i + 1` most
/// frequent words; the last entry is 1.0. Empty input gives an empty curve.
pub fn coverage_curve(counts: &AHashMap<String, u64>) -> Vec<f64> {
    let total: u64 = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut sorted: Vec<u64> = counts.values().copied().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let mut acc = 0u64;
    sorted
        .iter()
        .map(|c| {
            acc += c;
            acc as f64 / total as f64
        })
        .collect()
}
