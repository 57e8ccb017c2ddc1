//! In-memory corpus model: forums, discussion threads, comments.

use crate::text;
use serde::{Deserialize, Serialize};

/// One discussion thread as scraped: title, self text and the flattened
/// comment tree. Immutable once loaded; stored as one JSON line per
/// submission in the forum's corpus file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// One forum with its submissions in id order.
#[derive(Clone, Debug)]
pub struct Subreddit {
    pub name: String,
    pub submissions: Vec<Submission>,
}

impl Subreddit {
    /// Assemble a forum from decoded submissions: sort by id so downstream
    /// series order never depends on file order, and drop duplicate ids
    /// keeping the first occurrence. Duplicates are a scrape artifact and
    /// get logged rather than silently overwritten.
    pub fn from_submissions(name: impl Into<String>, mut submissions: Vec<Submission>) -> Self {
        let name = name.into();
        submissions.sort_by(|a, b| a.id.cmp(&b.id));
        let mut deduped: Vec<Submission> = Vec::with_capacity(submissions.len());
        for sub in submissions {
            match deduped.last() {
                Some(prev) if prev.id == sub.id => {
                    tracing::warn!(forum = %name, id = %sub.id, "dropping duplicate submission id");
                }
                _ => deduped.push(sub),
            }
        }
        Self { name, submissions: deduped }
    }

    pub fn comment_count(&self) -> usize {
        self.submissions.iter().map(|s| s.comments.len()).sum()
    }
}

/// The loaded corpus: forums in index-file order. Read-only to every
/// analytic pass; ordering is explicit here so outputs zip against it
/// instead of leaning on map iteration order.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    pub subreddits: Vec<Subreddit>,
}

impl Corpus {
    pub fn submission_count(&self) -> usize {
        self.subreddits.iter().map(|s| s.submissions.len()).sum()
    }

    pub fn comment_count(&self) -> usize {
        self.subreddits.iter().map(|s| s.comment_count()).sum()
    }

    /// Every comment of the corpus normalized into one flat token stream
    /// (stopwords removed, stemming per flag), in corpus order. Feed for
    /// the corpus-wide bigram index.
    pub fn normalized_tokens(&self, apply_stemming: bool) -> Vec<String> {
        let mut tokens = Vec::new();
        for sub in &self.subreddits {
            for submission in &sub.submissions {
                for comment in &submission.comments {
                    tokens.extend(text::normalize(comment, true, apply_stemming));
                }
            }
        }
        tokens
    }
}
