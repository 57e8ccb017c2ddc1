//! Discovery of per-forum corpus files and the forum index.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Map forum name -> corpus file, discovered as `<name>.jsonl.zst` directly
/// under `data_dir`. Discovery is for listings and sanity checks; the index
/// file decides analysis order.
pub fn discover_subreddits(data_dir: &Path) -> BTreeMap<String, PathBuf> {
    let re = Regex::new(r"^([A-Za-z0-9_\-.]+)\.jsonl\.zst$").unwrap();
    let mut map = BTreeMap::new();
    if !data_dir.exists() {
        return map;
    }
    for entry in WalkDir::new(data_dir).min_depth(1).max_depth(1) {
        let ent = match entry {
            Ok(ent) => ent,
            Err(e) => {
                tracing::warn!(dir = %data_dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if let Some(name) = ent.file_name().to_str() {
            if let Some(caps) = re.captures(name) {
                map.insert(caps[1].to_string(), ent.path().to_path_buf());
            }
        }
    }
    map
}

/// Corpus file path for one forum under `data_dir`.
pub fn subreddit_file(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{}.jsonl.zst", name))
}

/// Read the forum index: one name per line, in analysis order. Blank lines
/// and `#` comments are skipped. A missing index is an error; the caller
/// logs it and aborts the run.
pub fn load_index(path: &Path) -> Result<Vec<String>> {
    let file =
        File::open(path).with_context(|| format!("open forum index {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line.with_context(|| format!("read forum index {}", path.display()))?;
        let name = line.trim();
        if name.is_empty() || name.starts_with('#') {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}
