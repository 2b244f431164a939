//! Global configuration constants for ranklab.
//!
//! All scoring parameters and batch defaults are defined here. These are
//! compile-time defaults; runtime overrides are handled via CLI arguments in
//! `main.rs` and passed into scorers through explicit parameter structs.

/// BM25 term frequency saturation parameter.
///
/// Controls how quickly term frequency saturates. Higher values allow TF to
/// grow more. Standard value is 1.2 (range: 1.0–2.0).
pub const BM25_K1: f64 = 1.2;

/// BM25 document length normalization parameter.
///
/// 0.0 = no normalization, 1.0 = full normalization. Standard value is 0.75.
pub const BM25_B: f64 = 0.75;

/// BM25 query term frequency saturation parameter (`k2`, sometimes `k3`).
///
/// Weights repeated query terms via `(qf * (k2 + 1)) / (qf + k2)`. Large
/// values make the component approach `qf`; 500 is the conventional default.
pub const BM25_K2: f64 = 500.0;

/// Jelinek-Mercer smoothing weight on the document language model.
///
/// The smoothed probability is `lambda * p_doc + (1 - lambda) * p_coll`.
/// 0.4 favours the collection model, which suits short title queries.
pub const JM_LAMBDA: f64 = 0.4;

/// Floor substituted for a zero smoothed probability before taking the log.
///
/// A term absent from both the document and the collection would otherwise
/// produce `ln(0)`.
pub const JM_PROB_FLOOR: f64 = 1e-10;

/// Number of top-ranked documents assumed relevant by PRF expansion.
pub const PRF_TOP_DOCS: usize = 5;

/// Number of pooled terms appended to the query by PRF expansion.
pub const PRF_EXPANSION_TERMS: usize = 10;

/// Rank cutoff for Precision@k and DCG@k evaluation.
pub const EVAL_CUTOFF: usize = 10;

/// Default directory for ranking run files.
pub const DEFAULT_OUTPUT_DIR: &str = "./ranking-outputs";
