use crate::aggregate::{self, ForumCollocations, ForumFrequencies, ForumSeries};
use crate::config::AnalysisOptions;
use crate::corpus::{Corpus, Subreddit};
use crate::export::write_all_reports;
use crate::lexicon::Lexicon;
use crate::ngram::glue_endpoint_filter;
use crate::progress::make_count_progress;
use crate::store::CorpusStore;
use crate::unknown::{self, TermCloud, UnknownTermMap};
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct RedditSentiment {
    pub(crate) opts: AnalysisOptions,
}

/// Counts from a full `write_reports` run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub forums: usize,
    pub threads: usize,
    pub comments: usize,
    pub unknown_terms: usize,
    pub significant_terms: usize,
    pub out_dir: PathBuf,
}

impl RedditSentiment {
    pub fn new() -> Self {
        Self { opts: AnalysisOptions::default() }
    }

    // -------- Builder methods --------
    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_data_dir(dir); self }
    pub fn index_file(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_index_file(path); self }
    pub fn lexicon_file(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_lexicon_file(path); self }
    pub fn out_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_out_dir(dir); self }
    pub fn unknown_artifact(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_unknown_artifact(path); self }
    pub fn stemming(mut self, yes: bool) -> Self { self.opts = self.opts.with_stemming(yes); self }
    pub fn collocation_shape(mut self, n: usize, min_frequency: u64, top_k: usize) -> Self { self.opts = self.opts.with_collocation_shape(n, min_frequency, top_k); self }
    pub fn unknown_thresholds(mut self, min_occurrences: usize, min_abs_average: f64) -> Self { self.opts = self.opts.with_unknown_thresholds(min_occurrences, min_abs_average); self }
    pub fn cloud_top(mut self, top: usize) -> Self { self.opts = self.opts.with_cloud_top(top); self }
    pub fn forum_concurrency(mut self, n: usize) -> Self { self.opts = self.opts.with_forum_concurrency(n); self }
    pub fn parallelism(mut self, threads: usize) -> Self { self.opts = self.opts.with_parallelism(threads); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_read_buffer(bytes); self }
    pub fn io_write_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_write_buffer(bytes); self }
    pub fn io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self { self.opts = self.opts.with_io_buffers(read_bytes, write_bytes); self }

    // -------- Operations --------

    /// Per-thread lexicon sentiment for every forum in the index, in index
    /// order.
    pub fn sentiment(self) -> Result<Vec<ForumSeries>> {
        self.begin();
        let lexicon = self.load_lexicon()?;
        let corpus = self.load_corpus()?;
        Ok(aggregate::sentiment_series(&corpus, &lexicon))
    }

    /// Per-thread lexical diversity for every forum in the index.
    pub fn diversity(self) -> Result<Vec<ForumSeries>> {
        self.begin();
        let corpus = self.load_corpus()?;
        Ok(aggregate::diversity_series(&corpus))
    }

    /// Per-thread word frequencies plus the forum coverage curve.
    pub fn frequencies(self) -> Result<Vec<ForumFrequencies>> {
        self.begin();
        let corpus = self.load_corpus()?;
        Ok(aggregate::frequency_report(&corpus))
    }

    /// Per-thread top collocations, shaped by the configured n / frequency
    /// floor / K.
    pub fn collocations(self) -> Result<Vec<ForumCollocations>> {
        self.begin();
        let corpus = self.load_corpus()?;
        Ok(collocation_pass(&corpus, &self.opts))
    }

    /// Mine every comment for tokens the lexicon does not know and persist
    /// the full map to `unknown_artifact`. Forums are mined concurrently up
    /// to `forum_concurrency`.
    pub fn mine_unknown_terms(self) -> Result<UnknownTermMap> {
        self.begin();
        let lexicon = self.load_lexicon()?;
        let corpus = self.load_corpus()?;
        let map = mine_corpus(&corpus, &lexicon, &self.opts)?;
        self.store()
            .save_unknown_terms(&self.opts.unknown_artifact, &map)
            .with_context(|| {
                format!("save unknown-term artifact {}", self.opts.unknown_artifact.display())
            })?;
        tracing::info!(
            terms = map.len(),
            artifact = %self.opts.unknown_artifact.display(),
            "mined unknown terms"
        );
        Ok(map)
    }

    /// Collocate clouds for the significant terms of a previous mining run.
    /// The artifact written by [`mine_unknown_terms`](Self::mine_unknown_terms)
    /// must exist.
    pub fn term_clouds(self) -> Result<Vec<TermCloud>> {
        self.begin();
        let corpus = self.load_corpus()?;
        let map = self.store().load_unknown_terms(&self.opts.unknown_artifact)?;
        Ok(unknown::collocate_clouds(
            &corpus,
            &map,
            self.opts.unknown_min_occurrences,
            self.opts.unknown_min_abs_average,
            self.opts.apply_stemming,
            self.opts.cloud_top,
        ))
    }

    /// Run every analytic pass over the corpus, persist the unknown-term
    /// artifact, and write the presentation files into `out_dir`.
    pub fn write_reports(self) -> Result<RunSummary> {
        self.begin();
        let lexicon = self.load_lexicon()?;
        let corpus = self.load_corpus()?;
        let threads = corpus.submission_count();
        let comments = corpus.comment_count();

        let sentiment = aggregate::sentiment_series(&corpus, &lexicon);
        let diversity = aggregate::diversity_series(&corpus);
        let frequencies = aggregate::frequency_report(&corpus);
        let collocations = collocation_pass(&corpus, &self.opts);

        let map = mine_corpus(&corpus, &lexicon, &self.opts)?;
        self.store()
            .save_unknown_terms(&self.opts.unknown_artifact, &map)
            .with_context(|| {
                format!("save unknown-term artifact {}", self.opts.unknown_artifact.display())
            })?;
        let significant = unknown::significant_unknown_terms(
            &map,
            self.opts.unknown_min_occurrences,
            self.opts.unknown_min_abs_average,
        );
        let clouds = unknown::collocate_clouds(
            &corpus,
            &map,
            self.opts.unknown_min_occurrences,
            self.opts.unknown_min_abs_average,
            self.opts.apply_stemming,
            self.opts.cloud_top,
        );

        write_all_reports(&self.opts.out_dir, &sentiment, &diversity, &frequencies, &collocations, &clouds)?;
        tracing::info!(
            forums = corpus.subreddits.len(),
            threads,
            significant = significant.len(),
            out_dir = %self.opts.out_dir.display(),
            "reports written"
        );

        Ok(RunSummary {
            forums: corpus.subreddits.len(),
            threads,
            comments,
            unknown_terms: map.len(),
            significant_terms: significant.len(),
            out_dir: self.opts.out_dir.clone(),
        })
    }

    // -------- Shared plumbing --------

    fn begin(&self) {
        init_tracing_once();
        if let Some(n) = self.opts.parallelism {
            if n > 0 {
                rayon::ThreadPoolBuilder::new().num_threads(n).build_global().ok();
            }
        }
    }

    fn store(&self) -> CorpusStore {
        CorpusStore::new(&self.opts.data_dir)
            .with_io_buffers(self.opts.read_buffer_bytes, self.opts.write_buffer_bytes)
    }

    fn load_corpus(&self) -> Result<Corpus> {
        self.store().load_corpus(&self.opts.index_file)
    }

    fn load_lexicon(&self) -> Result<Lexicon> {
        Lexicon::load(&self.opts.lexicon_file)
    }
}

/// Trigram collocations drop grams glued together by filler endpoints, the
/// same rule the per-thread reports have always used. Bigrams pass through
/// unfiltered.
fn collocation_pass(corpus: &Corpus, opts: &AnalysisOptions) -> Vec<ForumCollocations> {
    let exclude: Option<&dyn Fn(&[String]) -> bool> = if opts.collocation_n >= 3 {
        Some(&glue_endpoint_filter)
    } else {
        None
    };
    aggregate::collocation_report(
        corpus,
        opts.collocation_n,
        opts.collocation_min_frequency,
        opts.collocation_top_k,
        exclude,
    )
}

/// Mine forums concurrently (bounded) and merge the owned partials back in
/// corpus order so record order inside each term stays deterministic.
fn mine_corpus(corpus: &Corpus, lexicon: &Lexicon, opts: &AnalysisOptions) -> Result<UnknownTermMap> {
    let pb = if opts.progress {
        Some(make_count_progress(
            corpus.subreddits.len() as u64,
            opts.progress_label.as_deref().unwrap_or("mining unknown terms"),
        ))
    } else {
        None
    };

    let indexed: Vec<(usize, &Subreddit)> = corpus.subreddits.iter().enumerate().collect();
    let parts = Mutex::new(Vec::<(usize, UnknownTermMap)>::new());
    crate::concurrency::for_each_limited(&indexed, opts.forum_concurrency, |(i, sub)| {
        let part = unknown::mine_subreddit_terms(sub, lexicon, opts.apply_stemming);
        parts.lock().push((*i, part));
        if let Some(pb) = &pb {
            pb.inc(1);
        }
        Ok(())
    })?;
    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let mut parts = parts.into_inner();
    parts.sort_by_key(|(i, _)| *i);
    let mut map = UnknownTermMap::new();
    for (_, part) in parts {
        unknown::merge_unknown_maps(&mut map, part);
    }
    Ok(map)
}
