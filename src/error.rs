//! Error types for corpus statistics, parsing, and batch processing.
//!
//! Statistics-level failures (`EmptyCorpus`, `MissingPartition`) are reported
//! per partition by the batch driver and the partition is skipped; they never
//! abort a whole batch. Arithmetic edge cases inside scoring (zero smoothed
//! probability, negative idf) are handled locally with guards and floors and
//! do not surface here.

use std::path::PathBuf;

/// Errors produced while building statistics or loading input files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A partition contained no documents, so `avgdl` is undefined.
    #[error("empty corpus: no documents in partition")]
    EmptyCorpus,

    /// No partition directory exists for a query's scope.
    #[error("missing partition for query '{query_id}': {path:?}")]
    MissingPartition {
        /// Query whose partition could not be found.
        query_id: String,
        /// Directory that was expected to hold the partition.
        path: PathBuf,
    },

    /// A topic record is missing a required field (number or title).
    ///
    /// Fatal for that record only; the surrounding file keeps parsing.
    #[error("malformed query record: {detail}")]
    MalformedQueryRecord {
        /// What was missing or unparsable.
        detail: String,
    },

    /// A relevance judgment line did not match `queryId docId relevance`.
    #[error("malformed qrels line {line} in {path:?}: {detail}")]
    MalformedQrelsLine {
        /// File the line came from.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was missing or unparsable.
        detail: String,
    },

    /// Underlying file IO failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
