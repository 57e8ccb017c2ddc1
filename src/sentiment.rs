//! Lexicon scoring of comments and discussion threads.

use crate::lexicon::Lexicon;

/// Per-comment scores inside this band are treated as neutral noise from
/// short or ambiguous comments and dropped before averaging.
const NEUTRAL_BAND: std::ops::RangeInclusive<i64> = -2..=2;

/// Sum of the valences of `tokens` known to the lexicon. Unknown tokens
/// contribute zero; they are surfaced separately by the unknown-term miner.
pub fn score_comment(tokens: &[String], lexicon: &Lexicon) -> i64 {
    tokens.iter().filter_map(|t| lexicon.get(t)).sum()
}

/// Average non-neutral comment score for one thread.
///
/// Comments are scored after a plain lowercase + whitespace split, not via
/// [`crate::text::normalize`]: punctuation-attached words ("great!") miss
/// the lexicon on purpose. Historically produced score series depend on
/// that behavior, so routing this through the tokenizer would silently
/// shift every series (see DESIGN.md).
///
/// Scores in [-2, 2] are discarded; the survivors are averaged. When every
/// comment is filtered out the divisor is 1, so the thread scores 0 rather
/// than dividing by zero.
pub fn thread_sentiment(comments: &[String], lexicon: &Lexicon) -> f64 {
    let mut kept: Vec<i64> = Vec::new();
    for comment in comments {
        let lowered = comment.to_lowercase();
        let score: i64 = lowered
            .split_whitespace()
            .filter_map(|word| lexicon.get(word))
            .sum();
        if !NEUTRAL_BAND.contains(&score) {
            kept.push(score);
        }
    }
    let total: i64 = kept.iter().sum();
    total as f64 / kept.len().max(1) as f64
}
