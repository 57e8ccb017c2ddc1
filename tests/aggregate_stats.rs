use rsent::{
    coverage_curve, diversity_series, frequency_distribution, lexical_diversity, sentiment_series,
    Corpus, Lexicon, Submission, Subreddit,
};

fn comments(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

fn submission(id: &str, title: &str, c: &[&str]) -> Submission {
    Submission {
        id: id.to_string(),
        url: format!("https://reddit.com/{}", id),
        title: title.to_string(),
        selftext: String::new(),
        comments: comments(c),
    }
}

/// A thread made of verbatim-identical comments is fully diverse: repeats
/// of the same comment (bot reposts, quote chains) are collapsed before
/// the ratio is taken.
#[test]
fn duplicated_comments_do_not_dilute_diversity() {
    let c = comments(&["the cat sat", "the cat sat"]);
    assert_eq!(lexical_diversity(&c), 1.0);
}

/// Repeats *within* one comment still count: "cat" twice out of three
/// tokens gives 2/3.
#[test]
fn diversity_counts_repeats_within_a_comment() {
    let c = comments(&["the cat sat on the cat"]);
    assert!((lexical_diversity(&c) - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn diversity_of_tokenless_threads_is_zero() {
    assert_eq!(lexical_diversity(&[]), 0.0);
    // all stopwords, nothing survives normalization
    assert_eq!(lexical_diversity(&comments(&["the of and", "!!!"])), 0.0);
}

/// Counting is a bag operation: comment order cannot change the result.
#[test]
fn frequency_distribution_is_order_invariant() {
    let a = comments(&["rye bread", "bread wins", "the crust"]);
    let mut b = a.clone();
    b.reverse();
    assert_eq!(frequency_distribution(&a), frequency_distribution(&b));
}

#[test]
fn frequency_distribution_counts_occurrences() {
    let counts = frequency_distribution(&comments(&["rye bread", "bread"]));
    assert_eq!(counts.get("bread").copied(), Some(2));
    assert_eq!(counts.get("rye").copied(), Some(1));
    assert_eq!(counts.get("the").copied(), None);
}

/// The coverage curve walks ranks in descending count order and ends at
/// exactly 1.0.
#[test]
fn coverage_curve_accumulates_to_one() {
    let counts = frequency_distribution(&comments(&["bread bread bread rye"]));
    let curve = coverage_curve(&counts);
    assert_eq!(curve, vec![0.75, 1.0]);

    let empty = frequency_distribution(&[]);
    assert!(coverage_curve(&empty).is_empty());
}

#[test]
fn coverage_curve_is_monotone() {
    let counts = frequency_distribution(&comments(&["rye bread crust crust bread crust oven"]));
    let curve = coverage_curve(&counts);
    assert!(curve.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(curve.last().copied(), Some(1.0));
}

/// Series walkers keep (forum, title, score) correlated: one score per
/// title, forums in corpus order, submissions in id order.
#[test]
fn series_zip_titles_and_scores_in_corpus_order() {
    let corpus = Corpus {
        subreddits: vec![
            Subreddit::from_submissions(
                "zeta",
                vec![
                    submission("b", "second", &["great great bread"]),
                    submission("a", "first", &["the cat sat"]),
                ],
            ),
            Subreddit::from_submissions("alpha", vec![submission("a", "only", &[])]),
        ],
    };
    let lex = Lexicon::from_entries(vec![("great".to_string(), 3)]);

    let sent = sentiment_series(&corpus, &lex);
    // corpus order, not name order
    assert_eq!(sent[0].name, "zeta");
    assert_eq!(sent[1].name, "alpha");
    // id order within the forum
    assert_eq!(sent[0].titles, vec!["first", "second"]);
    assert_eq!(sent[0].scores, vec![0.0, 6.0]);
    assert_eq!(sent[0].mean(), 3.0);
    // empty forum series stay aligned and mean to zero
    assert_eq!(sent[1].titles, vec!["only"]);
    assert_eq!(sent[1].scores, vec![0.0]);

    let div = diversity_series(&corpus);
    assert_eq!(div[0].titles, vec!["first", "second"]);
    // "great great bread" -> 2 distinct / 3 total
    assert!((div[0].scores[1] - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(div[0].scores[0], 1.0);
}

/// Duplicate submission ids keep the first occurrence in file order.
#[test]
fn duplicate_submission_ids_keep_first() {
    let sub = Subreddit::from_submissions(
        "x",
        vec![
            submission("s2", "late", &[]),
            submission("s1", "keeper", &[]),
            submission("s1", "shadow", &[]),
        ],
    );
    assert_eq!(sub.submissions.len(), 2);
    assert_eq!(sub.submissions[0].id, "s1");
    assert_eq!(sub.submissions[0].title, "keeper");
    assert_eq!(sub.submissions[1].id, "s2");
}
