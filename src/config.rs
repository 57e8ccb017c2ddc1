use std::path::{Path, PathBuf};

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    pub data_dir: PathBuf,            // per-forum .jsonl.zst files
    pub index_file: PathBuf,          // ordered forum list, one name per line
    pub lexicon_file: PathBuf,        // AFINN-style word<TAB>score TSV
    pub out_dir: PathBuf,             // report artifacts (JSON/TSV)
    pub unknown_artifact: PathBuf,    // mined unknown-term map (.json.zst)
    pub apply_stemming: bool,         // stem the mining/collocation token streams
    pub collocation_n: usize,         // 2 = bigrams, 3 = trigrams
    pub collocation_min_frequency: u64,
    pub collocation_top_k: usize,
    pub unknown_min_occurrences: usize, // significance: record count floor (inclusive)
    pub unknown_min_abs_average: f64,   // significance: |mean value| must exceed this
    pub cloud_top: usize,             // ranked bigrams kept per term cloud
    pub forum_concurrency: usize,     // limit number of forums mined concurrently
    pub parallelism: Option<usize>,   // Some(N) to set rayon threads, None to use default
    pub progress: bool,               // show progress bar
    pub progress_label: Option<String>, // optional label for progress bar

    // IO tuning
    pub read_buffer_bytes: usize,     // BufReader capacity
    pub write_buffer_bytes: usize,    // BufWriter capacity
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        let data = PathBuf::from("./data");
        // Defaults chosen to be safe but noticeably faster than std defaults.
        // Adjust at runtime via io_* builder methods.
        let default_read = 256 * 1024;
        let default_write = 256 * 1024;

        Self {
            index_file: data.join("subreddits.txt"),
            lexicon_file: data.join("AFINN-111.txt"),
            unknown_artifact: data.join("unknown_terms.json.zst"),
            data_dir: data,
            out_dir: PathBuf::from("./reports"),
            apply_stemming: false,
            collocation_n: 2,
            collocation_min_frequency: 4,
            collocation_top_k: 5,
            unknown_min_occurrences: 100,
            unknown_min_abs_average: 5.0,
            cloud_top: 10,
            forum_concurrency: 1, // safe default; mining holds a forum's tokens in memory
            parallelism: None,
            progress: true,
            progress_label: None,

            read_buffer_bytes: default_read,
            write_buffer_bytes: default_write,
        }
    }
}

impl AnalysisOptions {
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        let data = data_dir.as_ref().to_path_buf();
        self.index_file = data.join("subreddits.txt");
        self.lexicon_file = data.join("AFINN-111.txt");
        self.unknown_artifact = data.join("unknown_terms.json.zst");
        self.data_dir = data;
        self
    }
    pub fn with_index_file(mut self, path: impl AsRef<Path>) -> Self {
        self.index_file = path.as_ref().to_path_buf();
        self
    }
    pub fn with_lexicon_file(mut self, path: impl AsRef<Path>) -> Self {
        self.lexicon_file = path.as_ref().to_path_buf();
        self
    }
    pub fn with_out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_unknown_artifact(mut self, path: impl AsRef<Path>) -> Self {
        self.unknown_artifact = path.as_ref().to_path_buf();
        self
    }
    pub fn with_stemming(mut self, yes: bool) -> Self {
        self.apply_stemming = yes;
        self
    }
    pub fn with_collocation_shape(mut self, n: usize, min_frequency: u64, top_k: usize) -> Self {
        self.collocation_n = n.max(1);
        self.collocation_min_frequency = min_frequency.max(1);
        self.collocation_top_k = top_k;
        self
    }
    pub fn with_unknown_thresholds(mut self, min_occurrences: usize, min_abs_average: f64) -> Self {
        self.unknown_min_occurrences = min_occurrences;
        self.unknown_min_abs_average = min_abs_average;
        self
    }
    pub fn with_cloud_top(mut self, top: usize) -> Self {
        self.cloud_top = top.max(1);
        self
    }
    pub fn with_forum_concurrency(mut self, n: usize) -> Self {
        self.forum_concurrency = n.max(1);
        self
    }
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }

    // IO buffers tuning
    pub fn with_io_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_io_write_buffer(mut self, bytes: usize) -> Self {
        self.write_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buffer_bytes = read_bytes.max(8 * 1024);
        self.write_buffer_bytes = write_bytes.max(8 * 1024);
        self
    }
}
