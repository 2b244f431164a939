//! # ranklab
//!
//! Batch information-retrieval ranking and evaluation over small, per-query
//! document partitions.
//!
//! ## Features
//!
//! - **BM25 scoring** with the classic `k1`/`b`/`k2` parameterisation
//! - **Jelinek-Mercer language model** scoring with a configurable smoothing
//!   weight and probability floor
//! - **Pseudo-relevance feedback** query expansion (one-round, TF-IDF seeded)
//! - **Evaluation** against binary relevance judgments: MAP, P@10, DCG@10
//! - **Batch driver** that scores each query's partition independently and
//!   skips failed partitions instead of aborting the run
//!
//! ## Architecture
//!
//! ```text
//! Topic file ──▶ Queries ──┐
//!                          ├──▶ CorpusPartition ──▶ { BM25 | JM } ──▶ Ranking ──▶ run files
//! Partition dirs ──────────┘            ▲                 │
//!                                       └── PRF expander ─┘
//! Qrels files ──▶ RelevanceJudgments ──▶ Evaluation ──▶ MAP / P@10 / DCG@10
//! ```

/// Per-query batch driver: partition loading, scoring, and run output.
pub mod batch;
/// Global configuration constants: scoring parameters and defaults.
pub mod config;
/// Per-partition corpus statistics: documents, queries, df/cf aggregates.
pub mod corpus;
/// Error types for statistics, parsing, and batch failures.
pub mod error;
/// Ranking-quality metrics: average precision, P@10, DCG@10, and aggregation.
pub mod eval;
/// File formats: topic files, relevance judgments, and ranking run files.
pub mod formats;
/// Scoring models: BM25, Jelinek-Mercer LM, PRF expansion, and ranking types.
pub mod scoring;
/// Token source: lowercasing, alphanumeric splitting, stop words, stemming.
pub mod tokenizer;

pub use error::Error;
