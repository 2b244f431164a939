//! File formats: topic files, relevance judgments, and ranking run files.
//!
//! All parsers are strict about required fields and lenient about optional
//! ones; per-record failures are reported and skipped so one bad record
//! never poisons a whole file.

/// Relevance judgment loading (`queryId docId relevance` lines).
pub mod qrels;
/// TREC-style topic file parsing (`<Query>` records).
pub mod queries;
/// Ranking run file output (one file per model/query pair).
pub mod runs;

pub use qrels::RelevanceJudgments;
pub use queries::{parse_topics, QueryFields, TopicRecord};
pub use runs::RunTag;
