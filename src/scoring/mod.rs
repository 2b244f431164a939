//! Scoring models and ranking types.
//!
//! Each scorer takes a [`CorpusPartition`](crate::corpus::CorpusPartition)
//! and a [`Query`](crate::corpus::Query) and produces a [`ScoredList`]; a
//! [`Ranking`] is the deterministic ordering of a scored list (score
//! descending, ties broken by ascending document id).

/// BM25 scoring with `k1`/`b`/`k2` parameterisation.
pub mod bm25;
/// Jelinek-Mercer smoothed language-model scoring.
pub mod jm;
/// Pseudo-relevance feedback: TF-IDF seed pass plus one-round expansion.
pub mod prf;

pub use bm25::{bm25_scores, Bm25Params};
pub use jm::{jm_scores, JmParams};
pub use prf::{expand_query, tfidf_scores, PrfParams};

use std::collections::HashMap;

/// Scores for one query against one partition: document id → score.
///
/// No ordering guarantee until converted into a [`Ranking`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredList {
    scores: HashMap<String, f64>,
}

impl ScoredList {
    /// Create an empty scored list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) the score for a document.
    pub fn insert(&mut self, doc_id: impl Into<String>, score: f64) {
        self.scores.insert(doc_id.into(), score);
    }

    /// Score for a document, if present.
    pub fn get(&self, doc_id: &str) -> Option<f64> {
        self.scores.get(doc_id).copied()
    }

    /// Number of scored documents.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate `(doc id, score)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.scores.iter().map(|(id, &s)| (id.as_str(), s))
    }
}

/// A scored list sorted into its canonical order.
///
/// Sorted by score descending; equal scores are ordered by ascending
/// document id so output is reproducible across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    entries: Vec<(String, f64)>,
}

impl Ranking {
    /// Rank a scored list: score desc, then doc id asc.
    pub fn from_scores(scores: &ScoredList) -> Self {
        let mut entries: Vec<(String, f64)> = scores
            .scores
            .iter()
            .map(|(id, &s)| (id.clone(), s))
            .collect();
        entries.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    /// Ranked `(doc id, score)` pairs, best first.
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    /// Ranked document ids, best first.
    pub fn doc_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Number of ranked documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ranking is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_sorts_by_score_then_id() {
        let mut scores = ScoredList::new();
        scores.insert("b", 1.0);
        scores.insert("a", 1.0);
        scores.insert("c", 2.0);
        let ranking = Ranking::from_scores(&scores);
        let ids: Vec<&str> = ranking.doc_ids().collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn ranking_is_non_increasing() {
        let mut scores = ScoredList::new();
        for (i, id) in ["d1", "d2", "d3", "d4"].iter().enumerate() {
            scores.insert(*id, (i as f64) * 0.5 - 1.0);
        }
        let ranking = Ranking::from_scores(&scores);
        for pair in ranking.entries().windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn ranking_handles_negative_scores() {
        let mut scores = ScoredList::new();
        scores.insert("d1", -3.5);
        scores.insert("d2", -1.5);
        let ranking = Ranking::from_scores(&scores);
        assert_eq!(ranking.entries()[0].0, "d2");
    }
}
