//! Pseudo-relevance feedback query expansion.
//!
//! A one-round feedback loop: score the partition with a TF-IDF seed pass,
//! assume the top documents are relevant, pool their tokens, and append the
//! most frequent pooled terms to the query. The caller then reruns BM25 or
//! the JM model with the expanded query; the expansion itself never recurses.

use crate::config;
use crate::corpus::{CorpusPartition, Query};
use crate::scoring::ScoredList;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::HashMap;

/// Pseudo-relevance feedback parameters.
#[derive(Debug, Clone, Copy)]
pub struct PrfParams {
    /// Number of top-ranked documents assumed relevant.
    pub top_docs: usize,
    /// Number of pooled terms appended to the query.
    pub expansion_terms: usize,
}

impl Default for PrfParams {
    fn default() -> Self {
        Self {
            top_docs: config::PRF_TOP_DOCS,
            expansion_terms: config::PRF_EXPANSION_TERMS,
        }
    }
}

/// TF-IDF seed scoring for the feedback pass.
///
/// `tf = termCount / docLength`, `idf = ln(N / (1 + df) + 1)`, summed over
/// query tokens. The `1 + df` denominator keeps unseen terms finite and the
/// `+ 1` keeps idf positive, so this pass never produces negative scores.
pub fn tfidf_scores(partition: &CorpusPartition, query: &Query) -> ScoredList {
    let n = partition.num_docs() as f64;

    let mut scores = ScoredList::new();
    for doc in partition.documents() {
        let doc_len = doc.len() as f64;
        let mut score = 0.0;
        if doc_len > 0.0 {
            for term in &query.tokens {
                let tf = f64::from(doc.term_count(term)) / doc_len;
                let idf = (n / (1.0 + f64::from(partition.doc_freq(term))) + 1.0).ln();
                score += tf * idf;
            }
        }
        scores.insert(doc.id.clone(), score);
    }
    scores
}

/// Expand a query with terms pooled from its top TF-IDF documents.
///
/// Returns a new [`Query`] whose token sequence is the original sequence
/// followed by exactly `expansion_terms` pooled terms (fewer only when the
/// pool itself is smaller). Duplicates between original and pooled terms are
/// kept so term-frequency-weighted scorers see the reinforcement.
pub fn expand_query(partition: &CorpusPartition, query: &Query, params: PrfParams) -> Query {
    let seed = tfidf_scores(partition, query);
    let top_ids = top_k_docs(&seed, params.top_docs);

    // Pool tokens from the feedback documents in rank order; count term
    // frequency and remember first-encountered position for tie-breaking.
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    let mut position = 0usize;
    for doc_id in &top_ids {
        if let Some(doc) = partition.document(doc_id) {
            for token in &doc.tokens {
                let entry = counts.entry(token.as_str()).or_insert((0, position));
                entry.0 += 1;
                position += 1;
            }
        }
    }

    let mut pooled: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    pooled.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(&b.2)));

    let mut tokens = query.tokens.clone();
    tokens.extend(
        pooled
            .into_iter()
            .take(params.expansion_terms)
            .map(|(term, _, _)| term.to_string()),
    );
    Query::new(query.id.clone(), tokens)
}

/// Top-k document ids by score desc, ties by ascending id.
///
/// Partial sort via a min-heap of size k, so the seed pass never sorts the
/// whole partition.
fn top_k_docs(scores: &ScoredList, k: usize) -> Vec<String> {
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, Reverse<String>)>> =
        BinaryHeap::with_capacity(k + 1);
    for (doc_id, score) in scores.iter() {
        heap.push(Reverse((OrderedFloat(score), Reverse(doc_id.to_string()))));
        if heap.len() > k {
            heap.pop();
        }
    }
    let mut top: Vec<(OrderedFloat<f64>, String)> = heap
        .into_iter()
        .map(|Reverse((s, Reverse(id)))| (s, id))
        .collect();
    top.sort_unstable_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    top.into_iter().map(|(_, id)| id).collect()
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
    fn expansion_appends_configured_term_count() {
        let partition = partition(vec![
            ("d1", &["apple", "banana", "cherry", "durian"][..]),
            ("d2", &["apple", "banana", "cherry"][..]),
            ("d3", &["unrelated"][..]),
        ]);
        let query = Query::new("R101", toks(&["apple"]));
        let params = PrfParams {
            top_docs: 2,
            expansion_terms: 3,
        };
        let expanded = expand_query(&partition, &query, params);
        assert_eq!(expanded.id, "R101");
        assert_eq!(expanded.tokens.len(), query.tokens.len() + 3);
        // Original tokens lead the sequence unchanged.
        assert_eq!(&expanded.tokens[..query.tokens.len()], &query.tokens[..]);
    }

    #[test]
    fn pool_ties_break_by_first_encountered_order() {
        // Both docs rank above d3; every pooled term occurs exactly twice, so
        // ordering falls back to first encounter within the pooled sequence.
        let partition = partition(vec![
            ("d1", &["query", "alpha", "beta"][..]),
            ("d2", &["query", "alpha", "beta"][..]),
            ("d3", &["noise"][..]),
        ]);
        let query = Query::new("q", toks(&["query"]));
        let params = PrfParams {
            top_docs: 2,
            expansion_terms: 2,
        };
        let expanded = expand_query(&partition, &query, params);
        let appended = &expanded.tokens[query.tokens.len()..];
        assert_eq!(appended, &["query".to_string(), "alpha".to_string()]);
    }

    #[test]
    fn duplicates_from_pool_are_allowed() {
        let partition = partition(vec![
            ("d1", &["apple", "apple", "pie"][..]),
            ("d2", &["apple"][..]),
        ]);
        let query = Query::new("q", toks(&["apple"]));
        let params = PrfParams {
            top_docs: 1,
            expansion_terms: 1,
        };
        let expanded = expand_query(&partition, &query, params);
        // "apple" already in the query still wins the pool and is re-appended.
        assert_eq!(expanded.tokens, toks(&["apple", "apple"]));
    }

    #[test]
    fn tfidf_seed_prefers_matching_documents() {
        let partition = partition(vec![
            ("match", &["apple", "apple"][..]),
            ("other", &["banana"][..]),
        ]);
        let query = Query::new("q", toks(&["apple"]));
        let scores = tfidf_scores(&partition, &query);
        assert!(scores.get("match").unwrap() > scores.get("other").unwrap());
        assert_eq!(scores.get("other"), Some(0.0));
    }

    #[test]
    fn top_k_ties_break_by_ascending_id() {
        let mut scores = ScoredList::new();
        scores.insert("b", 1.0);
        scores.insert("a", 1.0);
        scores.insert("c", 0.5);
        let top = top_k_docs(&scores, 2);
        assert_eq!(top, vec!["a".to_string(), "b".to_string()]);
    }
}
