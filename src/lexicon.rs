//! Valence lexicon: word to signed integer score, AFINN-style TSV on disk.

use crate::text;
use ahash::AHashMap;
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Word -> valence table (roughly -5..=5). Immutable once loaded.
///
/// Entries keep their file order so that derived tables ([`Lexicon::stemmed`])
/// resolve key collisions deterministically.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    entries: Vec<(String, i64)>,
    index: AHashMap<String, i64>,
}

impl Lexicon {
    /// Parse `word<TAB>score` lines from `path`. Blank lines are skipped;
    /// any other malformed line fails the whole load, naming the line.
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("open lexicon {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("read lexicon {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let (word, raw_score) = line
                .split_once('\t')
                .ok_or_else(|| anyhow!("{}:{}: expected word<TAB>score", path.display(), i + 1))?;
            let score: i64 = raw_score.trim().parse().with_context(|| {
                format!("{}:{}: bad score {:?}", path.display(), i + 1, raw_score)
            })?;
            entries.push((word.to_string(), score));
        }
        Ok(Self::from_entries(entries))
    }

    /// Build a lexicon from in-memory entries, keeping their order. Later
    /// entries shadow earlier ones on duplicate words.
    pub fn from_entries(entries: Vec<(String, i64)>) -> Self {
        let mut index = AHashMap::with_capacity(entries.len());
        for (word, score) in &entries {
            index.insert(word.clone(), *score);
        }
        Self { entries, index }
    }

    /// Valence of `word`, if known.
    #[inline]
    pub fn get(&self, word: &str) -> Option<i64> {
        self.index.get(word).copied()
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Derived table keyed by Porter stem, for scoring stemmed token
    /// streams. Words collapsing to the same stem resolve to the last entry
    /// in file order.
    pub fn stemmed(&self) -> Self {
        let entries: Vec<(String, i64)> = self
            .entries
            .iter()
            .map(|(word, score)| (text::stem(word), *score))
            .collect();
        Self::from_entries(entries)
    }
}
