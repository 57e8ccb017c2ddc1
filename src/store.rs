//! On-disk corpus store: per-forum `.jsonl.zst` files plus the mined
//! unknown-term artifact.

use crate::corpus::{Corpus, Submission, Subreddit};
use crate::paths;
use crate::unknown::UnknownTermMap;
use crate::util::{now_rfc3339, replace_file_atomic};
use crate::zstd_jsonl::{for_each_line_cfg, ZstLineWriter};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Optional first line of a forum file: when the scrape tooling wrote the
/// file it records when and how much. Readers skip it; files without one
/// are plain submission JSONL.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotHeader {
    snapshot: SnapshotMeta,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotMeta {
    retrieved: String,
    count: u64,
}

/// Reader/writer for the flat per-forum corpus layout under one data
/// directory.
#[derive(Clone, Debug)]
pub struct CorpusStore {
    data_dir: PathBuf,
    read_buffer_bytes: usize,
    write_buffer_bytes: usize,
    compression_level: i32,
}

impl CorpusStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            read_buffer_bytes: 64 * 1024,
            write_buffer_bytes: 64 * 1024,
            compression_level: 3,
        }
    }

    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buffer_bytes = read_bytes.max(8 * 1024);
        self.write_buffer_bytes = write_bytes.max(8 * 1024);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load one forum from `<data_dir>/<name>.jsonl.zst`. Submissions are
    /// re-sorted by id with duplicates dropped (see
    /// [`Subreddit::from_submissions`]). A missing or undecodable file is
    /// an error.
    pub fn load_subreddit(&self, name: &str) -> Result<Subreddit> {
        let path = paths::subreddit_file(&self.data_dir, name);
        let mut submissions: Vec<Submission> = Vec::new();
        let mut line_no = 0u64;
        for_each_line_cfg(&path, self.read_buffer_bytes, |line| {
            line_no += 1;
            if line.is_empty() {
                return Ok(());
            }
            if line_no == 1 && serde_json::from_str::<SnapshotHeader>(line).is_ok() {
                return Ok(());
            }
            let sub: Submission = serde_json::from_str(line)
                .with_context(|| format!("{}:{}: bad submission record", path.display(), line_no))?;
            submissions.push(sub);
            Ok(())
        })?;
        Ok(Subreddit::from_submissions(name, submissions))
    }

    /// Load the whole corpus in the index file's forum order.
    pub fn load_corpus(&self, index_file: &Path) -> Result<Corpus> {
        let names = paths::load_index(index_file)?;
        let mut subreddits = Vec::with_capacity(names.len());
        for name in &names {
            let sub = self
                .load_subreddit(name)
                .with_context(|| format!("load forum {}", name))?;
            tracing::info!(
                forum = %sub.name,
                submissions = sub.submissions.len(),
                comments = sub.comment_count(),
                "loaded forum"
            );
            subreddits.push(sub);
        }
        Ok(Corpus { subreddits })
    }

    /// Write one forum's submissions with a snapshot header, atomically
    /// replacing any previous file. Returns the file path.
    pub fn save_subreddit(&self, sub: &Subreddit) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("create {}", self.data_dir.display()))?;
        let dest = paths::subreddit_file(&self.data_dir, &sub.name);
        let tmp = dest.with_extension("zst.tmp");

        let mut w = ZstLineWriter::create(&tmp, self.compression_level, self.write_buffer_bytes)?;
        let header = SnapshotHeader {
            snapshot: SnapshotMeta {
                retrieved: now_rfc3339(),
                count: sub.submissions.len() as u64,
            },
        };
        w.write_line(&serde_json::to_string(&header)?)?;
        for s in &sub.submissions {
            w.write_line(&serde_json::to_string(s)?)?;
        }
        w.finish()?;

        replace_file_atomic(&tmp, &dest)?;
        Ok(dest)
    }

    /// Persist the full mined unknown-term map as zstd-compressed JSON.
    /// Nothing is pruned here; the artifact is re-read by the offline
    /// significance and collocate passes.
    pub fn save_unknown_terms(&self, path: &Path, map: &UnknownTermMap) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let tmp = path.with_extension("tmp");
        let file = File::create(&tmp).with_context(|| format!("create {}", tmp.display()))?;
        let mut enc = zstd::stream::write::Encoder::new(
            BufWriter::with_capacity(self.write_buffer_bytes, file),
            self.compression_level,
        )?;
        serde_json::to_writer(&mut enc, map)
            .with_context(|| format!("encode unknown-term artifact {}", path.display()))?;
        let mut inner = enc.finish()?;
        inner.flush()?;
        replace_file_atomic(&tmp, path)?;
        Ok(())
    }

    /// Read back an unknown-term artifact written by
    /// [`save_unknown_terms`](Self::save_unknown_terms).
    pub fn load_unknown_terms(&self, path: &Path) -> Result<UnknownTermMap> {
        let file = File::open(path)
            .with_context(|| format!("open unknown-term artifact {}", path.display()))?;
        let dec = zstd::stream::read::Decoder::new(file)?;
        let map = serde_json::from_reader(BufReader::with_capacity(self.read_buffer_bytes, dec))
            .with_context(|| format!("decode unknown-term artifact {}", path.display()))?;
        Ok(map)
    }
}
