use serde_json::json;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Write a compressed `.jsonl.zst` file containing the provided lines.
/// Mirrors the per-forum corpus files but with tiny content.
pub fn write_zst_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// Write a plain text file (index, lexicon).
pub fn write_text(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Read a text file line-by-line into strings (useful for .tsv).
pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines().map(|l| l.unwrap()).filter(|s| !s.is_empty()).collect()
}

/// Parse a JSON report file.
pub fn read_json(path: &Path) -> serde_json::Value {
    let f = File::open(path).unwrap();
    serde_json::from_reader(BufReader::new(f)).unwrap()
}

/// Build a tiny **valid** corpus data dir with:
/// - `subreddits.txt` listing `rust` then `cooking` (plus a `#` comment line)
/// - `AFINN-111.txt`, a ten-word valence lexicon
/// - `rust.jsonl.zst` (**with** a snapshot header line): 2 submissions
///     s1 "Iterator adapters": one +7 comment, one neutral comment
///     s2 "Borrow checker woes": a -6 and a -3 comment
/// - `cooking.jsonl.zst` (**no** header line): 1 submission
///     s1 "Sourdough starter": one +6 comment
///
/// Expected thread sentiments: rust = [7.0, -4.5], cooking = [6.0].
pub fn make_corpus_basic() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.into_path();

    write_text(&base.join("subreddits.txt"), "# analysis set\nrust\ncooking\n");
    write_text(
        &base.join("AFINN-111.txt"),
        "abandoned\t-2\namazing\t4\nawful\t-3\nbad\t-3\ngood\t3\ngreat\t3\nhate\t-3\nhorrible\t-3\nlove\t3\nterrible\t-3\n",
    );

    let rust_lines = vec![
        json!({"snapshot": {"retrieved": "2025-11-02T09:30:00Z", "count": 2}}).to_string(),
        json!({
            "id": "s1", "url": "https://reddit.com/r/rust/s1",
            "title": "Iterator adapters", "selftext": "",
            "comments": ["I love this crate, amazing work", "this is fine"]
        })
        .to_string(),
        json!({
            "id": "s2", "url": "https://reddit.com/r/rust/s2",
            "title": "Borrow checker woes", "selftext": "",
            "comments": ["terrible error messages, hate them", "bad docs"]
        })
        .to_string(),
    ];
    write_zst_lines(&base.join("rust.jsonl.zst"), &rust_lines);

    let cooking_lines = vec![json!({
        "id": "s1", "url": "https://reddit.com/r/cooking/s1",
        "title": "Sourdough starter", "selftext": "",
        "comments": ["great great bread"]
    })
    .to_string()];
    write_zst_lines(&base.join("cooking.jsonl.zst"), &cooking_lines);

    base
}
