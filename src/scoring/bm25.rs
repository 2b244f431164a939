//! BM25 scoring.
//!
//! Scores every document in a partition against a query using the BM25
//! formula with configurable `k1`, `b`, and `k2` (see [`crate::config`]).
//! The idf component uses `log10((N - df + 0.5) / (df + 0.5))` and may go
//! **negative** for terms occurring in more than half the partition's
//! documents; negative idf is preserved, not clamped, since it legitimately
//! penalises over-common terms.

use crate::config;
use crate::corpus::{CorpusPartition, Query};
use crate::scoring::ScoredList;
use std::collections::HashSet;

/// BM25 parameters.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Params {
    /// Term-frequency saturation parameter.
    pub k1: f64,
    /// Document length normalization parameter.
    pub b: f64,
    /// Query term frequency saturation parameter.
    pub k2: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: config::BM25_K1,
            b: config::BM25_B,
            k2: config::BM25_K2,
        }
    }
}

/// Score every document in the partition against the query.
///
/// Only **distinct** query terms contribute; repeated query terms are
/// weighted through the `qf` component instead. A document sharing no terms
/// with the query scores exactly 0.
pub fn bm25_scores(partition: &CorpusPartition, query: &Query, params: Bm25Params) -> ScoredList {
    let n = partition.num_docs() as f64;
    let avgdl = partition.avgdl();

    // Distinct query terms in first-occurrence order, so the floating-point
    // accumulation order (and thus the exact score) is reproducible.
    let mut seen: HashSet<&str> = HashSet::with_capacity(query.tokens.len());
    let distinct_terms: Vec<&str> = query
        .tokens
        .iter()
        .map(String::as_str)
        .filter(|t| seen.insert(*t))
        .collect();

    let mut scores = ScoredList::new();
    for doc in partition.documents() {
        let dl = doc.len() as f64;
        let big_k = params.k1 * ((1.0 - params.b) + params.b * (dl / avgdl));

        let mut score = 0.0;
        for &term in &distinct_terms {
            let f = f64::from(doc.term_count(term));
            if f == 0.0 {
                continue;
            }
            let df = f64::from(partition.doc_freq(term));
            let qf = f64::from(query.term_count(term));

            let idf = ((n - df + 0.5) / (df + 0.5)).log10();
            let tf_component = (f * (params.k1 + 1.0)) / (f + big_k);
            let qf_component = (qf * (params.k2 + 1.0)) / (qf + params.k2);
            score += idf * tf_component * qf_component;
        }
        scores.insert(doc.id.clone(), score);
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusPartition;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn partition(docs: Vec<(&str, &[&str])>) -> CorpusPartition {
        CorpusPartition::from_documents(
            docs.into_iter().map(|(id, words)| (id.to_string(), toks(words))),
        )
        .unwrap()
    }

    #[test]
    fn no_overlap_scores_exactly_zero() {
        let partition = partition(vec![
            ("d1", &["apple", "banana"][..]),
            ("d2", &["cherry"][..]),
        ]);
        let query = Query::new("q", toks(&["durian", "elderberry"]));
        let scores = bm25_scores(&partition, &query, Bm25Params::default());
        assert_eq!(scores.get("d1"), Some(0.0));
        assert_eq!(scores.get("d2"), Some(0.0));
    }

    #[test]
    fn matches_hand_computed_score() {
        // Partition: d1 = [a, a, b], d2 = [b], d3 = [c].
        // N = 3, avgdl = 5/3, df[a] = 1.
        let partition = partition(vec![
            ("d1", &["a", "a", "b"][..]),
            ("d2", &["b"][..]),
            ("d3", &["c"][..]),
        ]);
        let query = Query::new("q", toks(&["a"]));
        let params = Bm25Params::default();
        let scores = bm25_scores(&partition, &query, params);

        let idf = ((3.0_f64 - 1.0 + 0.5) / (1.0 + 0.5)).log10();
        let big_k = 1.2 * (0.25 + 0.75 * (3.0 / (5.0 / 3.0)));
        let tf = (2.0 * 2.2) / (2.0 + big_k);
        let qf = (1.0 * 501.0) / (1.0 + 500.0);
        let expected = idf * tf * qf;
        assert!((scores.get("d1").unwrap() - expected).abs() < 1e-12);
        assert!(expected > 0.0);
    }

    #[test]
    fn negative_idf_is_preserved() {
        // "common" appears in 3 of 4 documents: df > N/2 so idf < 0.
        let partition = partition(vec![
            ("d1", &["common", "x"][..]),
            ("d2", &["common"][..]),
            ("d3", &["common"][..]),
            ("d4", &["y"][..]),
        ]);
        let query = Query::new("q", toks(&["common"]));
        let scores = bm25_scores(&partition, &query, Bm25Params::default());
        assert!(scores.get("d1").unwrap() < 0.0, "idf must not be clamped");
        // Non-matching doc is still exactly zero.
        assert_eq!(scores.get("d4"), Some(0.0));
    }

    #[test]
    fn repeated_query_terms_raise_qf_component() {
        let partition = partition(vec![("d1", &["a", "b"][..]), ("d2", &["b", "c"][..])]);
        let single = Query::new("q1", toks(&["a"]));
        let doubled = Query::new("q2", toks(&["a", "a"]));
        let params = Bm25Params::default();
        let s1 = bm25_scores(&partition, &single, params);
        let s2 = bm25_scores(&partition, &doubled, params);
        // idf for "a" is positive here (df=1, N=2), so a larger qf component
        // strictly increases the score.
        assert!(s2.get("d1").unwrap() > s1.get("d1").unwrap());
    }

    #[test]
    fn rescoring_is_bit_identical() {
        let partition = partition(vec![
            ("d1", &["a", "b", "c"][..]),
            ("d2", &["a", "c"][..]),
            ("d3", &["c"][..]),
        ]);
        let query = Query::new("q", toks(&["a", "c"]));
        let params = Bm25Params::default();
        let first = bm25_scores(&partition, &query, params);
        let second = bm25_scores(&partition, &query, params);
        assert_eq!(first, second);
    }
}
