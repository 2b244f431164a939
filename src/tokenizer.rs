//! Token source: lowercasing, alphanumeric splitting, stop word removal, and
//! Porter stemming.
//!
//! A [`TokenSource`] is built once per batch and shared by every partition:
//! the stop word set and stemmer are immutable after construction, so
//! tokenization is deterministic and safe to call from parallel workers.

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Common English stop words plus markup noise terms that survive tag
/// stripping in the news-wire collections (`xml`, `newsitem`, ...).
const BUILTIN_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have",
    "he", "her", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me",
    "more", "most", "my", "no", "not", "of", "on", "only", "or", "other", "our", "out", "over",
    "she", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "to", "under", "up", "was", "we", "were", "what", "when", "where", "which",
    "who", "will", "with", "would", "you", "your",
    // markup noise
    "xml", "newsitem", "root", "en", "titl",
];

/// Shared tokenization configuration: stop words + stemmer, built once.
pub struct TokenSource {
    stop_words: HashSet<String>,
    stemmer: Stemmer,
}

impl Default for TokenSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource {
    /// Create a token source with the built-in English stop word set.
    pub fn new() -> Self {
        Self {
            stop_words: BUILTIN_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Extend the stop word set from a comma-separated word list file.
    pub fn with_stopword_file(path: &Path) -> io::Result<Self> {
        let mut source = Self::new();
        let content = fs::read_to_string(path)?;
        source.stop_words.extend(
            content
                .split(',')
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        tracing::debug!(
            "loaded stop words from {:?} ({} total)",
            path,
            source.stop_words.len()
        );
        Ok(source)
    }

    /// Number of stop words currently configured.
    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    /// Tokenize raw text: lowercase, split on non-alphanumeric boundaries,
    /// drop stop words, stem the remainder. Deterministic for a given input.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (i, c) in lowered.char_indices() {
            if c.is_alphanumeric() {
                if start.is_none() {
                    start = Some(i);
                }
            } else if let Some(s) = start.take() {
                self.push_token(&lowered[s..i], &mut tokens);
            }
        }
        if let Some(s) = start {
            self.push_token(&lowered[s..], &mut tokens);
        }

        tokens
    }

    fn push_token(&self, raw: &str, out: &mut Vec<String>) {
        if raw.is_empty() || self.stop_words.contains(raw) {
            return;
        }
        out.push(self.stemmer.stem(raw).into_owned());
    }
}
