//! Presentation interchange: the analytic results written as JSON and TSV
//! files for the external chart/word-cloud renderer. The core stops at
//! data; colors, fonts and layout belong to the renderer.

use crate::aggregate::{ForumCollocations, ForumFrequencies, ForumSeries};
use crate::unknown::TermCloud;
use crate::util::now_rfc3339;
use ahash::AHashMap;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Words exported per thread in the frequency report.
const TOP_WORDS_PER_THREAD: usize = 25;

/// Write every presentation artifact for one analysis run into `out_dir`.
pub fn write_all_reports(
    out_dir: &Path,
    sentiment: &[ForumSeries],
    diversity: &[ForumSeries],
    frequencies: &[ForumFrequencies],
    collocations: &[ForumCollocations],
    clouds: &[TermCloud],
) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    write_json(out_dir.join("series.sentiment.json"), sentiment)?;
    write_series_tsv(&out_dir.join("series.sentiment.tsv"), sentiment)?;

    write_json(out_dir.join("series.diversity.json"), diversity)?;
    write_series_tsv(&out_dir.join("series.diversity.tsv"), diversity)?;

    let freqs = build_frequencies(frequencies);
    write_json(out_dir.join("frequencies.json"), &freqs)?;

    let colls = build_collocations(collocations);
    write_json(out_dir.join("collocations.json"), &colls)?;

    let cloud_docs = build_clouds(clouds);
    write_json(out_dir.join("term_clouds.json"), &cloud_docs)?;

    let threads: usize = sentiment.iter().map(|s| s.titles.len()).sum();
    let idx = json!({
        "generated": now_rfc3339(),
        "forums": sentiment.len(),
        "threads": threads,
        "files": [
            "series.sentiment.json",
            "series.sentiment.tsv",
            "series.diversity.json",
            "series.diversity.tsv",
            "frequencies.json",
            "collocations.json",
            "term_clouds.json"
        ]
    });
    write_json(out_dir.join("report.index.json"), &idx)?;

    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("write {}", path.display()))
}

/// One TSV row per thread: forum, title, score. Tabs and newlines in
/// titles are flattened to spaces so the file stays line oriented.
fn write_series_tsv(path: &Path, series: &[ForumSeries]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "forum\ttitle\tscore")?;
    for s in series {
        for (title, score) in s.titles.iter().zip(&s.scores) {
            writeln!(w, "{}\t{}\t{}", s.name, flatten_ws(title), score)?;
        }
    }
    w.flush()?;
    Ok(())
}

fn flatten_ws(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

#[derive(Serialize)]
struct VThreadWords {
    title: String,
    words: Vec<(String, u64)>,
}

#[derive(Serialize)]
struct VForumFrequencies {
    name: String,
    threads: Vec<VThreadWords>,
    coverage: Vec<f64>,
}

fn build_frequencies(report: &[ForumFrequencies]) -> Vec<VForumFrequencies> {
    report
        .iter()
        .map(|forum| {
            let threads = forum
                .titles
                .iter()
                .zip(&forum.counts)
                .map(|(title, counts)| VThreadWords {
                    title: title.clone(),
                    words: top_words(counts, TOP_WORDS_PER_THREAD),
                })
                .collect();
            VForumFrequencies {
                name: forum.name.clone(),
                threads,
                coverage: forum.coverage.clone(),
            }
        })
        .collect()
}

fn top_words(counts: &AHashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut v: Vec<(String, u64)> = counts.iter().map(|(w, c)| (w.clone(), *c)).collect();
    v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    v.truncate(limit);
    v
}

#[derive(Serialize)]
struct VCollocation {
    phrase: String,
    score: f64,
}

#[derive(Serialize)]
struct VThreadCollocations {
    title: String,
    collocations: Vec<VCollocation>,
}

#[derive(Serialize)]
struct VForumCollocations {
    name: String,
    threads: Vec<VThreadCollocations>,
}

fn build_collocations(report: &[ForumCollocations]) -> Vec<VForumCollocations> {
    report
        .iter()
        .map(|forum| {
            let threads = forum
                .titles
                .iter()
                .zip(&forum.collocations)
                .map(|(title, ranked)| VThreadCollocations {
                    title: title.clone(),
                    collocations: ranked
                        .iter()
                        .map(|(gram, score)| VCollocation {
                            phrase: gram.join(" "),
                            score: *score,
                        })
                        .collect(),
                })
                .collect();
            VForumCollocations { name: forum.name.clone(), threads }
        })
        .collect()
}

#[derive(Serialize)]
struct VCloudWord {
    word: String,
    score: f64,
    positive: bool,
}

#[derive(Serialize)]
struct VTermCloud {
    term: String,
    mean_value: f64,
    positive: bool,
    words: Vec<VCloudWord>,
}

fn build_clouds(clouds: &[TermCloud]) -> Vec<VTermCloud> {
    clouds
        .iter()
        .map(|cloud| VTermCloud {
            term: cloud.term.clone(),
            mean_value: cloud.mean_value,
            positive: cloud.positive,
            words: cloud
                .words
                .iter()
                .map(|(word, score)| VCloudWord {
                    word: word.clone(),
                    score: *score,
                    positive: cloud.positive,
                })
                .collect(),
        })
        .collect()
}
