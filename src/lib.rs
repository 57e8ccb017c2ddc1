mod config;
mod paths;
mod zstd_jsonl;
mod util;
mod progress;
mod concurrency;

mod text;
mod lexicon;
mod sentiment;
mod stats;
mod ngram;

mod corpus;
mod store;

mod unknown;
mod aggregate;

mod export;
mod pipeline;

pub use crate::config::AnalysisOptions;
pub use crate::corpus::{Corpus, Submission, Subreddit};
pub use crate::lexicon::Lexicon;
pub use crate::pipeline::{RedditSentiment, RunSummary};
pub use crate::store::CorpusStore;

// Expose the analytic core so callers can run single passes without the
// pipeline.
pub use crate::ngram::{collocations, glue_endpoint_filter, NgramIndex};
pub use crate::sentiment::{score_comment, thread_sentiment};
pub use crate::stats::{coverage_curve, frequency_distribution, lexical_diversity};
pub use crate::text::{normalize, stem};

pub use crate::aggregate::{
    collocation_report, diversity_series, frequency_report, sentiment_series, ForumCollocations,
    ForumFrequencies, ForumSeries,
};
pub use crate::unknown::{
    collocate_clouds, merge_unknown_maps, mine_subreddit_terms, mine_unknown_terms,
    significant_unknown_terms, unknown_term_collocates, TermCloud, UnknownTermMap,
    UnknownTermRecord,
};

// Expose progress helpers so binaries can label their own passes.
pub use crate::progress::make_count_progress;

// Expose discovery and report writing for acquisition/rendering tooling.
pub use crate::export::write_all_reports;
pub use crate::paths::{discover_subreddits, load_index, subreddit_file};
