//! Ranking-quality metrics and evaluation aggregation.
//!
//! Compares rankings against binary relevance judgments and produces
//! average precision, Precision@10, and DCG@10 per query, plus their means
//! across all judged queries. Queries without judgments are excluded from
//! the means rather than counted as zero.
//!
//! Note: average precision here divides by the number of relevant documents
//! actually **encountered** in the ranking, not the total relevant count for
//! the query. This matches the reference behaviour this tool reproduces.

use crate::config;
use crate::formats::qrels::RelevanceJudgments;
use crate::scoring::Ranking;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Metrics for a single query.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QueryMetrics {
    /// Average precision over encountered relevant documents.
    pub average_precision: f64,
    /// Relevant documents in the top 10, divided by the fixed denominator 10.
    pub precision_at_10: f64,
    /// Discounted cumulative gain over the top 10 positions.
    pub dcg_at_10: f64,
}

/// Aggregate evaluation over a batch of queries.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    /// Mean average precision across judged queries.
    pub mean_average_precision: f64,
    /// Mean Precision@10 across judged queries.
    pub mean_precision_at_10: f64,
    /// Mean DCG@10 across judged queries.
    pub mean_dcg_at_10: f64,
    /// Number of queries that had relevance judgments and were evaluated.
    pub queries_evaluated: usize,
    /// Per-query metric rows, keyed by query id.
    pub per_query: BTreeMap<String, QueryMetrics>,
}

/// Average precision: accumulate `hits / rank` at each relevant position,
/// divided by the number of hits encountered (0 when there are none).
pub fn average_precision<'a>(
    ranked_docs: impl IntoIterator<Item = &'a str>,
    relevant: &HashSet<&str>,
) -> f64 {
    let mut hits = 0u32;
    let mut cumulative = 0.0;
    for (i, doc_id) in ranked_docs.into_iter().enumerate() {
        if relevant.contains(doc_id) {
            hits += 1;
            cumulative += f64::from(hits) / (i as f64 + 1.0);
        }
    }
    if hits == 0 {
        0.0
    } else {
        cumulative / f64::from(hits)
    }
}

/// Precision@k with a fixed denominator of `k`, regardless of how many
/// relevant documents exist for the query.
pub fn precision_at_k<'a>(
    ranked_docs: impl IntoIterator<Item = &'a str>,
    relevant: &HashSet<&str>,
    k: usize,
) -> f64 {
    let hits = ranked_docs
        .into_iter()
        .take(k)
        .filter(|doc_id| relevant.contains(doc_id))
        .count();
    hits as f64 / k as f64
}

/// DCG@k for binary relevance: `sum 1 / log2(i + 1)` over relevant documents
/// at 1-based ranks `i <= k`. The discount starts at `log2(2)` so the first
/// position contributes exactly 1.
pub fn dcg_at_k<'a>(
    ranked_docs: impl IntoIterator<Item = &'a str>,
    relevant: &HashSet<&str>,
    k: usize,
) -> f64 {
    ranked_docs
        .into_iter()
        .take(k)
        .enumerate()
        .filter(|(_, doc_id)| relevant.contains(*doc_id))
        .map(|(i, _)| 1.0 / (i as f64 + 2.0).log2())
        .sum()
}

/// Compute all three metrics for one query.
pub fn query_metrics(ranking: &Ranking, relevant: &HashSet<&str>) -> QueryMetrics {
    QueryMetrics {
        average_precision: average_precision(ranking.doc_ids(), relevant),
        precision_at_10: precision_at_k(ranking.doc_ids(), relevant, config::EVAL_CUTOFF),
        dcg_at_10: dcg_at_k(ranking.doc_ids(), relevant, config::EVAL_CUTOFF),
    }
}

/// Evaluate a batch of rankings against the judgment table.
///
/// Only queries present in `judgments` contribute; the means divide by the
/// judged-query count, never the full batch size.
pub fn evaluate(
    rankings: &BTreeMap<String, Ranking>,
    judgments: &RelevanceJudgments,
) -> EvalReport {
    let mut per_query = BTreeMap::new();
    let mut sum_ap = 0.0;
    let mut sum_p10 = 0.0;
    let mut sum_dcg = 0.0;

    for (query_id, ranking) in rankings {
        let Some(relevant) = judgments.relevant_docs(query_id) else {
            tracing::debug!("query {} has no judgments, excluded from means", query_id);
            continue;
        };
        let metrics = query_metrics(ranking, &relevant);
        sum_ap += metrics.average_precision;
        sum_p10 += metrics.precision_at_10;
        sum_dcg += metrics.dcg_at_10;
        per_query.insert(query_id.clone(), metrics);
    }

    let n = per_query.len();
    let mean = |sum: f64| if n > 0 { sum / n as f64 } else { 0.0 };
    EvalReport {
        mean_average_precision: mean(sum_ap),
        mean_precision_at_10: mean(sum_p10),
        mean_dcg_at_10: mean(sum_dcg),
        queries_evaluated: n,
        per_query,
    }
}
