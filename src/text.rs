//! Tokenization and normalization of raw comment text.

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::OnceLock;

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Alphabetic runs, optionally joined by one internal apostrophe.
    // Digits and punctuation never survive, not even as separators.
    RE.get_or_init(|| Regex::new(r"[a-z]+'[a-z]+|[a-z]+").unwrap())
}

fn stopwords() -> &'static HashSet<String> {
    static SET: OnceLock<HashSet<String>> = OnceLock::new();
    SET.get_or_init(|| {
        stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .collect()
    })
}

fn stemmer() -> &'static Stemmer {
    static STEM: OnceLock<Stemmer> = OnceLock::new();
    STEM.get_or_init(|| Stemmer::create(Algorithm::English))
}

/// Lowercase `text` and reduce it to word tokens: runs of ASCII letters,
/// optionally containing a single internal apostrophe ("don't" is one
/// token). With `remove_stopwords`, common English function words are
/// dropped; with `apply_stemming`, each survivor is reduced to its Porter
/// stem. Stopwords are checked before stemming.
///
/// Pure function of its inputs; empty or letter-free input yields an empty
/// Vec.
pub fn normalize(text: &str, remove_stopwords: bool, apply_stemming: bool) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();
    for m in token_re().find_iter(&lowered) {
        let word = m.as_str();
        if remove_stopwords && stopwords().contains(word) {
            continue;
        }
        if apply_stemming {
            tokens.push(stemmer().stem(word).into_owned());
        } else {
            tokens.push(word.to_string());
        }
    }
    tokens
}

/// Porter stem of a single lowercase word.
pub fn stem(word: &str) -> String {
    stemmer().stem(word).into_owned()
}
