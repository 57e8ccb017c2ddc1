#[path = "common/mod.rs"]
mod common;

use rsent::RedditSentiment;

/// Full run over the basic corpus: every report file lands in `out_dir`,
/// the artifact lands in the data dir, and the summary counts match the
/// fixture.
///
/// Expectation: sentiment rust = [7.0, -4.5], cooking = [6.0]; 7 unknown
/// terms of which 6 clear thresholds (1, 0.5); "fine" stays below with a
/// mean of zero.
#[test]
fn full_run_writes_reports() {
    let base = common::make_corpus_basic();
    let out = base.join("reports");

    let summary = RedditSentiment::new()
        .data_dir(&base)
        .out_dir(&out)
        .unknown_thresholds(1, 0.5)
        .progress(false)
        .write_reports()
        .unwrap();

    assert_eq!(summary.forums, 2);
    assert_eq!(summary.threads, 3);
    assert_eq!(summary.comments, 5);
    assert_eq!(summary.unknown_terms, 7);
    assert_eq!(summary.significant_terms, 6);
    assert_eq!(summary.out_dir, out);

    for name in [
        "series.sentiment.json",
        "series.sentiment.tsv",
        "series.diversity.json",
        "series.diversity.tsv",
        "frequencies.json",
        "collocations.json",
        "term_clouds.json",
        "report.index.json",
    ] {
        assert!(out.join(name).exists(), "missing report file {name}");
    }
    assert!(base.join("unknown_terms.json.zst").exists());

    let sent = common::read_json(&out.join("series.sentiment.json"));
    assert_eq!(sent[0]["name"], "rust");
    assert_eq!(sent[1]["name"], "cooking");
    assert_eq!(sent[0]["titles"][0], "Iterator adapters");
    assert_eq!(sent[0]["scores"][0], 7.0);
    assert_eq!(sent[0]["scores"][1], -4.5);
    assert_eq!(sent[1]["scores"][0], 6.0);

    let div = common::read_json(&out.join("series.diversity.json"));
    assert_eq!(div[0]["scores"][0], 1.0);
    assert_eq!(div[0]["scores"][1], 1.0);
    let cooking_div = div[1]["scores"][0].as_f64().unwrap();
    assert!((cooking_div - 2.0 / 3.0).abs() < 1e-9);

    let tsv = common::read_lines(&out.join("series.sentiment.tsv"));
    assert_eq!(tsv[0], "forum\ttitle\tscore");
    assert_eq!(tsv.len(), 4);
    assert_eq!(tsv[1], "rust\tIterator adapters\t7");
    assert_eq!(tsv[2], "rust\tBorrow checker woes\t-4.5");
    assert_eq!(tsv[3], "cooking\tSourdough starter\t6");

    let freq = common::read_json(&out.join("frequencies.json"));
    assert_eq!(freq[1]["name"], "cooking");
    assert_eq!(freq[1]["threads"][0]["words"][0][0], "great");
    assert_eq!(freq[1]["threads"][0]["words"][0][1], 2);
    let coverage = freq[1]["coverage"].as_array().unwrap();
    assert!((coverage[0].as_f64().unwrap() - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(coverage[1], 1.0);

    let clouds = common::read_json(&out.join("term_clouds.json"));
    let arr = clouds.as_array().unwrap();
    assert_eq!(arr.len(), 6);
    let terms: Vec<&str> = arr.iter().map(|c| c["term"].as_str().unwrap()).collect();
    assert_eq!(terms, vec!["bread", "crate", "docs", "error", "messages", "work"]);
    assert_eq!(arr[0]["positive"], true);
    assert_eq!(arr[0]["words"][0]["word"], "great");
    assert_eq!(arr[0]["words"][0]["score"], 1.0);

    let idx = common::read_json(&out.join("report.index.json"));
    assert_eq!(idx["forums"], 2);
    assert_eq!(idx["threads"], 3);
    assert!(idx["generated"].as_str().is_some());
    assert_eq!(idx["files"].as_array().unwrap().len(), 7);
}

/// The sentiment pass alone returns series in index order without writing
/// anything.
#[test]
fn sentiment_pass_alone() {
    let base = common::make_corpus_basic();
    let series = RedditSentiment::new().data_dir(&base).progress(false).sentiment().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].name, "rust");
    assert_eq!(series[0].scores, vec![7.0, -4.5]);
    assert_eq!(series[1].scores, vec![6.0]);
    assert!((series[0].mean() - 1.25).abs() < 1e-9);
    assert!(!base.join("reports").exists());
}

/// Mining persists the artifact; a separate builder picks it up for term
/// clouds.
#[test]
fn mine_then_clouds_roundtrip() {
    let base = common::make_corpus_basic();
    let map = RedditSentiment::new()
        .data_dir(&base)
        .progress(false)
        .mine_unknown_terms()
        .unwrap();
    assert_eq!(map.len(), 7);
    assert_eq!(map["crate"].len(), 1);
    assert_eq!(map["crate"][0].subreddit, "rust");
    assert_eq!(map["crate"][0].value, 7);
    assert!(base.join("unknown_terms.json.zst").exists());

    let clouds = RedditSentiment::new()
        .data_dir(&base)
        .unknown_thresholds(1, 0.5)
        .progress(false)
        .term_clouds()
        .unwrap();
    assert_eq!(clouds.len(), 6);
    assert_eq!(clouds[0].term, "bread");
    assert_eq!(clouds[0].words, vec![("great".to_string(), 1.0)]);
}

/// Concurrent mining merges partials back in corpus order, so the result
/// matches the sequential run exactly.
#[test]
fn concurrent_mining_matches_sequential() {
    let base = common::make_corpus_basic();
    let seq = RedditSentiment::new()
        .data_dir(&base)
        .forum_concurrency(1)
        .progress(false)
        .mine_unknown_terms()
        .unwrap();
    let par = RedditSentiment::new()
        .data_dir(&base)
        .forum_concurrency(4)
        .progress(false)
        .mine_unknown_terms()
        .unwrap();
    assert_eq!(seq, par);
}

/// With stemming on the mined keys are stems and lexicon lookups follow
/// suit: "docs" is recorded as "doc", still carrying the comment value
/// from the stem-keyed lexicon.
#[test]
fn stemming_rekeys_mined_terms() {
    let base = common::make_corpus_basic();
    let map = RedditSentiment::new()
        .data_dir(&base)
        .stemming(true)
        .progress(false)
        .mine_unknown_terms()
        .unwrap();
    assert!(map.contains_key("doc"));
    assert!(!map.contains_key("docs"));
    assert_eq!(map["doc"][0].value, -3);
}

#[test]
fn term_clouds_require_the_artifact() {
    let base = common::make_corpus_basic();
    let err = RedditSentiment::new().data_dir(&base).progress(false).term_clouds().unwrap_err();
    assert!(format!("{err:#}").contains("unknown-term artifact"));
}

/// A lexicon line without a tab fails the whole run, naming file and line.
#[test]
fn malformed_lexicon_is_fatal() {
    let base = common::make_corpus_basic();
    common::write_text(&base.join("AFINN-111.txt"), "good\t3\nbroken line\n");
    let err = RedditSentiment::new().data_dir(&base).progress(false).sentiment().unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains(":2: expected word<TAB>score"), "unexpected error: {msg}");
}

#[test]
fn missing_index_is_fatal() {
    let base = common::make_corpus_basic();
    std::fs::remove_file(base.join("subreddits.txt")).unwrap();
    let err = RedditSentiment::new().data_dir(&base).progress(false).diversity().unwrap_err();
    assert!(format!("{err:#}").contains("open forum index"));
}

/// A forum listed in the index without a corpus file aborts the load,
/// naming the forum.
#[test]
fn missing_forum_file_is_fatal() {
    let base = common::make_corpus_basic();
    common::write_text(&base.join("subreddits.txt"), "rust\nghost\n");
    let err = RedditSentiment::new().data_dir(&base).progress(false).diversity().unwrap_err();
    assert!(format!("{err:#}").contains("load forum ghost"));
}
