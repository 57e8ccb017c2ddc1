//! Contiguous n-gram index over a token stream, with pure ranked queries.

use crate::text;
use ahash::AHashMap;

struct Ngram {
    words: Vec<String>,
    count: u64,
}

/// Immutable index of the contiguous n-grams of one token stream. Counts
/// and first-seen order are fixed at build time; every query is a pure read,
/// so one index can back any number of independent filters.
pub struct NgramIndex {
    n: usize,
    total: u64,
    grams: Vec<Ngram>, // first-seen order
}

impl NgramIndex {
    /// Index all length-`n` windows of `tokens`. Streams shorter than `n`
    /// (and `n == 0`) produce an empty index.
    pub fn from_tokens(tokens: &[String], n: usize) -> Self {
        if n == 0 || tokens.len() < n {
            return Self { n, total: 0, grams: Vec::new() };
        }
        let mut order: AHashMap<&[String], usize> = AHashMap::new();
        let mut grams: Vec<Ngram> = Vec::new();
        let mut total = 0u64;
        for window in tokens.windows(n) {
            total += 1;
            match order.get(window) {
                Some(&i) => grams[i].count += 1,
                None => {
                    order.insert(window, grams.len());
                    grams.push(Ngram { words: window.to_vec(), count: 1 });
                }
            }
        }
        Self { n, total, grams }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of n-gram occurrences in the source stream (the scoring
    /// denominator), not the number of distinct n-grams.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Top collocations: drop n-grams occurring fewer than `min_frequency`
    /// times and those the `exclude` predicate rejects, score the rest by
    /// occurrences over [`total`](Self::total), and return at most `top_k`
    /// by descending score. Ties keep first-seen order.
    pub fn top_k(
        &self,
        min_frequency: u64,
        top_k: usize,
        exclude: Option<&dyn Fn(&[String]) -> bool>,
    ) -> Vec<(Vec<String>, f64)> {
        if self.total == 0 {
            return Vec::new();
        }
        let mut survivors: Vec<&Ngram> = self
            .grams
            .iter()
            .filter(|g| g.count >= min_frequency)
            .filter(|g| exclude.map_or(true, |f| !f(&g.words)))
            .collect();
        // stable sort over a first-seen-ordered base keeps ties in
        // first-seen order
        survivors.sort_by(|a, b| b.count.cmp(&a.count));
        survivors.truncate(top_k);
        survivors
            .into_iter()
            .map(|g| (g.words.clone(), g.count as f64 / self.total as f64))
            .collect()
    }

    /// Distinct n-grams containing `word`, ranked by count descending with
    /// ties in first-seen order.
    pub fn containing(&self, word: &str) -> Vec<(&[String], u64)> {
        let mut hits: Vec<&Ngram> = self
            .grams
            .iter()
            .filter(|g| g.words.iter().any(|w| w == word))
            .collect();
        hits.sort_by(|a, b| b.count.cmp(&a.count));
        hits.into_iter()
            .map(|g| (g.words.as_slice(), g.count))
            .collect()
    }
}

/// Top collocations for one thread: n-grams over the normalized
/// concatenation of `comments` (stopwords removed, stemming applied), with
/// the index built fresh and discarded.
pub fn collocations(
    comments: &[String],
    n: usize,
    min_frequency: u64,
    top_k: usize,
    exclude: Option<&dyn Fn(&[String]) -> bool>,
) -> Vec<(Vec<String>, f64)> {
    let mut tokens = Vec::new();
    for comment in comments {
        tokens.extend(text::normalize(comment, true, true));
    }
    NgramIndex::from_tokens(&tokens, n).top_k(min_frequency, top_k, exclude)
}

/// Exclusion predicate for collocation mining: rejects n-grams ending in
/// "the" or with "and" at either end, which otherwise crowd out real
/// phrases in ranked output.
pub fn glue_endpoint_filter(gram: &[String]) -> bool {
    match (gram.first(), gram.last()) {
        (Some(first), Some(last)) => {
            last.as_str() == "the" || first.as_str() == "and" || last.as_str() == "and"
        }
        _ => false,
    }
}
