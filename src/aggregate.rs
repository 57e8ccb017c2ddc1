//! Corpus-wide aggregation: per-thread analytics grouped by forum. Every
//! walker zips scores against titles in explicit corpus order so chart
//! labels stay correlated with their values.

use crate::corpus::{Corpus, Subreddit};
use crate::lexicon::Lexicon;
use crate::ngram;
use crate::sentiment;
use crate::stats;
use ahash::AHashMap;
use serde::Serialize;

/// Per-thread scores for one forum: `scores[i]` belongs to `titles[i]`,
/// both in the forum's submission order.
#[derive(Clone, Debug, Serialize)]
pub struct ForumSeries {
    pub name: String,
    pub titles: Vec<String>,
    pub scores: Vec<f64>,
}

impl ForumSeries {
    fn from_threads(sub: &Subreddit, mut score: impl FnMut(&[String]) -> f64) -> Self {
        let mut titles = Vec::with_capacity(sub.submissions.len());
        let mut scores = Vec::with_capacity(sub.submissions.len());
        for s in &sub.submissions {
            titles.push(s.title.clone());
            scores.push(score(&s.comments));
        }
        Self { name: sub.name.clone(), titles, scores }
    }

    /// Mean of the series, 0.0 when empty. Matches what the bar-chart
    /// renderer plots per forum.
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().sum::<f64>() / self.scores.len() as f64
    }
}

/// Average non-neutral thread sentiment, one series per forum.
pub fn sentiment_series(corpus: &Corpus, lexicon: &Lexicon) -> Vec<ForumSeries> {
    corpus
        .subreddits
        .iter()
        .map(|sub| ForumSeries::from_threads(sub, |c| sentiment::thread_sentiment(c, lexicon)))
        .collect()
}

/// Lexical diversity per thread, one series per forum.
pub fn diversity_series(corpus: &Corpus) -> Vec<ForumSeries> {
    corpus
        .subreddits
        .iter()
        .map(|sub| ForumSeries::from_threads(sub, stats::lexical_diversity))
        .collect()
}

/// Word frequencies for one forum: a count map per thread plus the
/// forum-level cumulative coverage curve over all threads combined.
#[derive(Clone, Debug)]
pub struct ForumFrequencies {
    pub name: String,
    pub titles: Vec<String>,
    pub counts: Vec<AHashMap<String, u64>>,
    pub coverage: Vec<f64>,
}

pub fn frequency_report(corpus: &Corpus) -> Vec<ForumFrequencies> {
    corpus
        .subreddits
        .iter()
        .map(|sub| {
            let mut titles = Vec::with_capacity(sub.submissions.len());
            let mut counts = Vec::with_capacity(sub.submissions.len());
            let mut combined: AHashMap<String, u64> = AHashMap::new();
            for s in &sub.submissions {
                titles.push(s.title.clone());
                let c = stats::frequency_distribution(&s.comments);
                for (word, n) in &c {
                    *combined.entry(word.clone()).or_insert(0) += n;
                }
                counts.push(c);
            }
            let coverage = stats::coverage_curve(&combined);
            ForumFrequencies { name: sub.name.clone(), titles, counts, coverage }
        })
        .collect()
}

/// Ranked collocations for one forum, one list per thread.
#[derive(Clone, Debug)]
pub struct ForumCollocations {
    pub name: String,
    pub titles: Vec<String>,
    pub collocations: Vec<Vec<(Vec<String>, f64)>>,
}

pub fn collocation_report(
    corpus: &Corpus,
    n: usize,
    min_frequency: u64,
    top_k: usize,
    exclude: Option<&dyn Fn(&[String]) -> bool>,
) -> Vec<ForumCollocations> {
    corpus
        .subreddits
        .iter()
        .map(|sub| {
            let mut titles = Vec::with_capacity(sub.submissions.len());
            let mut collocations = Vec::with_capacity(sub.submissions.len());
            for s in &sub.submissions {
                titles.push(s.title.clone());
                collocations.push(ngram::collocations(&s.comments, n, min_frequency, top_k, exclude));
            }
            ForumCollocations { name: sub.name.clone(), titles, collocations }
        })
        .collect()
}
