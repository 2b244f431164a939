//! Jelinek-Mercer smoothed language-model scoring.
//!
//! Scores a document by the log-likelihood of the query under a linear
//! interpolation of the document and collection language models:
//! `p(t) = lambda * p_doc(t) + (1 - lambda) * p_coll(t)`. `lambda` weights
//! the **document** model; the default of 0.4 leans on the collection model,
//! which behaves well for short queries over small partitions.
//!
//! Every token of the query contributes, so repeated query terms add their
//! log-probability repeatedly. A zero interpolated probability is floored
//! (see [`JmParams::floor`]) instead of producing `ln(0)`.

use crate::config;
use crate::corpus::{CorpusPartition, Query};
use crate::scoring::ScoredList;

/// Jelinek-Mercer parameters.
#[derive(Debug, Clone, Copy)]
pub struct JmParams {
    /// Interpolation weight on the document model, in `[0, 1]`.
    pub lambda: f64,
    /// Substitute probability when the interpolated probability is 0.
    pub floor: f64,
}

impl Default for JmParams {
    fn default() -> Self {
        Self {
            lambda: config::JM_LAMBDA,
            floor: config::JM_PROB_FLOOR,
        }
    }
}

impl JmParams {
    /// Create parameters with a custom lambda, clamped to `[0, 1]`.
    pub fn with_lambda(lambda: f64) -> Self {
        Self {
            lambda: lambda.clamp(0.0, 1.0),
            ..Self::default()
        }
    }
}

/// Score every document in the partition against the query.
///
/// `p_doc` is 0 for an empty document and `p_coll` is 0 when the collection
/// is empty, so such cases fall back to the other model (or the floor).
pub fn jm_scores(partition: &CorpusPartition, query: &Query, params: JmParams) -> ScoredList {
    let coll_len = partition.total_len() as f64;

    let mut scores = ScoredList::new();
    for doc in partition.documents() {
        let doc_len = doc.len() as f64;

        let mut score = 0.0;
        for term in &query.tokens {
            let p_doc = if doc_len > 0.0 {
                f64::from(doc.term_count(term)) / doc_len
            } else {
                0.0
            };
            let p_coll = if coll_len > 0.0 {
                partition.coll_freq(term) as f64 / coll_len
            } else {
                0.0
            };
            let p = params.lambda * p_doc + (1.0 - params.lambda) * p_coll;
            score += if p > 0.0 { p.ln() } else { params.floor.ln() };
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
    fn matches_hand_computed_score() {
        // d1 = [a, b], d2 = [b]. L = 3, cf[a] = 1.
        let partition = partition(vec![("d1", &["a", "b"][..]), ("d2", &["b"][..])]);
        let query = Query::new("q", toks(&["a"]));
        let params = JmParams::default();
        let scores = jm_scores(&partition, &query, params);

        let expected_d1 = (0.4_f64 * 0.5 + 0.6 * (1.0 / 3.0)).ln();
        let expected_d2 = (0.6_f64 * (1.0 / 3.0)).ln();
        assert!((scores.get("d1").unwrap() - expected_d1).abs() < 1e-12);
        assert!((scores.get("d2").unwrap() - expected_d2).abs() < 1e-12);
    }

    #[test]
    fn empty_document_uses_collection_model_only() {
        let partition = partition(vec![("empty", &[][..]), ("d2", &["a", "b"][..])]);
        let query = Query::new("q", toks(&["a"]));
        let scores = jm_scores(&partition, &query, JmParams::default());

        // p_doc = 0 for the empty doc, so only the collection term remains.
        let expected = (0.6_f64 * 0.5).ln();
        assert!((scores.get("empty").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn unseen_term_is_floored_not_nan() {
        let partition = partition(vec![("d1", &["a"][..])]);
        let query = Query::new("q", toks(&["zzz"]));
        let scores = jm_scores(&partition, &query, JmParams::default());
        let score = scores.get("d1").unwrap();
        assert!(score.is_finite());
        assert!((score - config::JM_PROB_FLOOR.ln()).abs() < 1e-12);
    }

    #[test]
    fn repeated_query_tokens_contribute_repeatedly() {
        let partition = partition(vec![("d1", &["a", "b"][..]), ("d2", &["b", "c"][..])]);
        let once = Query::new("q1", toks(&["a"]));
        let twice = Query::new("q2", toks(&["a", "a"]));
        let params = JmParams::default();
        let s1 = jm_scores(&partition, &once, params);
        let s2 = jm_scores(&partition, &twice, params);
        let single = s1.get("d1").unwrap();
        let double = s2.get("d1").unwrap();
        assert!((double - 2.0 * single).abs() < 1e-12);
    }

    #[test]
    fn rescoring_is_bit_identical() {
        let partition = partition(vec![("d1", &["a", "b"][..]), ("d2", &["b"][..])]);
        let query = Query::new("q", toks(&["a", "b", "a"]));
        let params = JmParams::default();
        assert_eq!(
            jm_scores(&partition, &query, params),
            jm_scores(&partition, &query, params)
        );
    }
}
