//! Word pools: the candidate words a session draws boards from.
//!
//! A pool is loaded once per session kind from a plain-text word list
//! (`<pools-dir>/<kind>.txt`, one word per line, `#` for comments) and is
//! immutable afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// An immutable, ordered list of distinct candidate words.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Parse a word list: one word per line, whitespace trimmed, blank
    /// lines and `#` comment lines skipped, duplicates dropped keeping the
    /// first occurrence.
    pub fn parse(text: &str) -> Self {
        let mut words: Vec<String> = Vec::new();
        for line in text.lines() {
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            if !words.iter().any(|w| w == word) {
                words.push(word.to_string());
            }
        }
        Self { words }
    }

    /// Load the word list for `kind` from `<dir>/<kind>.txt`.
    ///
    /// Kinds are bare file stems; anything with path separators or `..`
    /// could name a file outside the pools directory and is rejected.
    pub fn load(dir: &Path, kind: &str) -> Result<Self, GameError> {
        if kind.is_empty() || kind.contains(['/', '\\']) || kind.contains("..") {
            return Err(GameError::PoolUnavailable {
                kind: kind.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "pool kind must be a bare file name",
                ),
            });
        }
        let path = dir.join(format!("{kind}.txt"));
        let text = std::fs::read_to_string(&path).map_err(|source| GameError::PoolUnavailable {
            kind: kind.to_string(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Number of words in the pool.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` is a member of the pool.
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// The words in pool order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}
