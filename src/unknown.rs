//! Unknown-term mining: tokens the lexicon does not know, tracked with the
//! valence of the comments they appeared in. Feeds manual lexicon
//! extension.

use crate::corpus::{Corpus, Subreddit};
use crate::lexicon::Lexicon;
use crate::ngram::NgramIndex;
use crate::sentiment::score_comment;
use crate::text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One sighting of an unknown term: the forum it appeared in, the lexicon
/// sum of the whole comment, and that sum averaged over the comment's
/// tokens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnknownTermRecord {
    pub subreddit: String,
    pub value: i64,
    pub average: f64,
}

/// Full mining result: term -> one record per sighting. A BTreeMap keeps
/// the persisted artifact in stable key order.
pub type UnknownTermMap = BTreeMap<String, Vec<UnknownTermRecord>>;

/// Walk every comment of the corpus and record each token occurrence the
/// lexicon does not know. Tokens are normalized with stopwords removed and
/// stemming per `apply_stemming`; with stemming on, lookups go against the
/// stem-keyed lexicon so known words are not misreported as unknown. A
/// token occurring twice in one comment yields two records. Comments with
/// no tokens contribute nothing.
///
/// Returns an owned accumulator; nothing is pruned here, the full map is
/// meant to be persisted for offline filtering.
pub fn mine_unknown_terms(
    corpus: &Corpus,
    lexicon: &Lexicon,
    apply_stemming: bool,
) -> UnknownTermMap {
    let stemmed;
    let lex = if apply_stemming {
        stemmed = lexicon.stemmed();
        &stemmed
    } else {
        lexicon
    };

    let mut map = UnknownTermMap::new();
    for sub in &corpus.subreddits {
        mine_into(&mut map, sub, lex, apply_stemming);
    }
    map
}

/// Single-forum variant of [`mine_unknown_terms`]; the pipeline fans these
/// out per forum and merges the owned partials.
pub fn mine_subreddit_terms(
    sub: &Subreddit,
    lexicon: &Lexicon,
    apply_stemming: bool,
) -> UnknownTermMap {
    let stemmed;
    let lex = if apply_stemming {
        stemmed = lexicon.stemmed();
        &stemmed
    } else {
        lexicon
    };

    let mut map = UnknownTermMap::new();
    mine_into(&mut map, sub, lex, apply_stemming);
    map
}

/// `lex` must already be keyed the way the token stream is (stemmed when
/// `apply_stemming` is set).
fn mine_into(map: &mut UnknownTermMap, sub: &Subreddit, lex: &Lexicon, apply_stemming: bool) {
    for submission in &sub.submissions {
        for comment in &submission.comments {
            let tokens = text::normalize(comment, true, apply_stemming);
            if tokens.is_empty() {
                continue;
            }
            let value = score_comment(&tokens, lex);
            let average = value as f64 / tokens.len() as f64;
            for token in &tokens {
                if lex.contains(token) {
                    continue;
                }
                map.entry(token.clone()).or_default().push(UnknownTermRecord {
                    subreddit: sub.name.clone(),
                    value,
                    average,
                });
            }
        }
    }
}

/// Merge a partial mining result into `into`, appending records per term.
/// Used when forums are mined in parallel and the owned partials are
/// combined afterwards.
pub fn merge_unknown_maps(into: &mut UnknownTermMap, part: UnknownTermMap) {
    for (term, mut records) in part {
        into.entry(term).or_default().append(&mut records);
    }
}

/// Filter the mined map down to terms worth proposing for the lexicon: at
/// least `min_occurrences` sightings, and a mean comment value whose
/// magnitude exceeds `min_abs_average`. Returns (term, mean value) pairs in
/// the map's key order.
pub fn significant_unknown_terms(
    map: &UnknownTermMap,
    min_occurrences: usize,
    min_abs_average: f64,
) -> Vec<(String, f64)> {
    let mut out = Vec::new();
    for (term, records) in map {
        if records.len() < min_occurrences {
            continue;
        }
        let mean = records.iter().map(|r| r.value).sum::<i64>() as f64 / records.len() as f64;
        if mean.abs() > min_abs_average {
            out.push((term.clone(), mean));
        }
    }
    out
}

/// Collocate cloud for one significant unknown term: partner words with
/// scores normalized against the second-ranked bigram, plus the polarity of
/// the term's mean comment value (drives the green/red cloud coloring
/// downstream).
#[derive(Clone, Debug, Serialize)]
pub struct TermCloud {
    pub term: String,
    pub mean_value: f64,
    pub positive: bool,
    pub words: Vec<(String, f64)>,
}

/// Build collocate clouds for `terms` (as produced by
/// [`significant_unknown_terms`]) against one shared bigram index over the
/// whole corpus stream. The index is built once; each per-term pass is a
/// pure filter over it.
///
/// Per term: bigrams containing the term ranked by frequency, top `top`;
/// each bigram contributes its partner word with the bigram's count divided
/// by the second-ranked count. With a single ranked bigram the divisor is
/// its own count, so the entry scores 1.0; in the normal case the top entry
/// exceeds 1.0, a quirk the cloud renderer expects. Terms with no
/// containing bigram are skipped. Repeated partner words stay repeated.
pub fn unknown_term_collocates(
    index: &NgramIndex,
    terms: &[(String, f64)],
    top: usize,
) -> Vec<TermCloud> {
    let mut clouds = Vec::new();
    for (term, mean) in terms {
        let mut ranked = index.containing(term);
        if ranked.is_empty() {
            continue;
        }
        ranked.truncate(top);
        let denom = ranked.get(1).map(|&(_, c)| c).unwrap_or(ranked[0].1) as f64;

        // left partners in rank order, then right partners in rank order
        let mut words: Vec<(String, f64)> = Vec::new();
        for (gram, count) in &ranked {
            if let Some(first) = gram.first() {
                if first != term {
                    words.push((first.clone(), *count as f64 / denom));
                }
            }
        }
        for (gram, count) in &ranked {
            if let Some(last) = gram.last() {
                if last != term {
                    words.push((last.clone(), *count as f64 / denom));
                }
            }
        }

        clouds.push(TermCloud {
            term: term.clone(),
            mean_value: *mean,
            positive: *mean > 0.0,
            words,
        });
    }
    clouds
}

/// Convenience: significance filter plus collocate clouds in one call,
/// building the corpus-wide bigram index internally.
pub fn collocate_clouds(
    corpus: &Corpus,
    map: &UnknownTermMap,
    min_occurrences: usize,
    min_abs_average: f64,
    apply_stemming: bool,
    top: usize,
) -> Vec<TermCloud> {
    let terms = significant_unknown_terms(map, min_occurrences, min_abs_average);
    let tokens = corpus.normalized_tokens(apply_stemming);
    let index = NgramIndex::from_tokens(&tokens, 2);
    unknown_term_collocates(&index, &terms, top)
}
