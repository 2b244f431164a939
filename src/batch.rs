//! Per-query batch driver.
//!
//! Each query owns an independent partition (the directory `Data_C<nnn>` for
//! query `R<nnn>`), so partitions are loaded, scored, and written in
//! parallel with no shared mutable state. A partition that fails to load is
//! reported and skipped; the batch always runs to completion.

use crate::corpus::{CorpusPartition, Query};
use crate::error::Error;
use crate::formats::runs::{self, RunTag};
use crate::scoring::{
    bm25_scores, expand_query, jm_scores, Bm25Params, JmParams, PrfParams, Ranking,
};
use crate::tokenizer::TokenSource;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Which scoring model a batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    /// Plain BM25.
    Bm25,
    /// Jelinek-Mercer language model.
    JmLm,
    /// PRF expansion, rescored with BM25.
    PrfBm25,
    /// PRF expansion, rescored with the JM language model.
    PrfJm,
}

impl Model {
    /// Run file family for this model.
    pub fn run_tag(self) -> RunTag {
        match self {
            Model::Bm25 => RunTag::Bm25,
            Model::JmLm => RunTag::JmLm,
            Model::PrfBm25 | Model::PrfJm => RunTag::Prf,
        }
    }
}

/// Batch configuration: paths, model choice, and scoring parameters.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Root directory holding the `Data_C<nnn>` partition directories.
    pub collection_root: PathBuf,
    /// Directory for ranking run files; `None` disables run output.
    pub output_dir: Option<PathBuf>,
    /// Scoring model.
    pub model: Model,
    /// BM25 parameters (used by `Bm25` and `PrfBm25`).
    pub bm25: Bm25Params,
    /// JM parameters (used by `JmLm` and `PrfJm`).
    pub jm: JmParams,
    /// PRF parameters (used by the `Prf*` models).
    pub prf: PrfParams,
}

impl BatchConfig {
    /// Configuration with default scoring parameters.
    pub fn new(collection_root: impl Into<PathBuf>, model: Model) -> Self {
        Self {
            collection_root: collection_root.into(),
            output_dir: None,
            model,
            bm25: Bm25Params::default(),
            jm: JmParams::default(),
            prf: PrfParams::default(),
        }
    }
}

/// Partition directory for a query: `Data_C<nnn>` for query id `R<nnn>`.
pub fn partition_dir(collection_root: &Path, query_id: &str) -> PathBuf {
    let digits = query_id.trim_start_matches(|c: char| !c.is_ascii_digit());
    collection_root.join(format!("Data_C{digits}"))
}

/// Load one query's partition from disk.
///
/// Every readable file in the directory becomes one document whose id is the
/// file stem. Unreadable files are logged and skipped; a missing directory
/// is [`Error::MissingPartition`] and an empty one is [`Error::EmptyCorpus`].
pub fn load_partition(
    collection_root: &Path,
    query_id: &str,
    source: &TokenSource,
) -> Result<CorpusPartition, Error> {
    let dir = partition_dir(collection_root, query_id);
    if !dir.is_dir() {
        return Err(Error::MissingPartition {
            query_id: query_id.to_string(),
            path: dir,
        });
    }

    let mut docs = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let doc_id = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };
        match fs::read_to_string(&path) {
            Ok(text) => docs.push((doc_id, source.tokenize(&text))),
            Err(e) => tracing::warn!("skipping unreadable document {:?}: {}", path, e),
        }
    }
    CorpusPartition::from_documents(docs)
}

/// Score one query against its partition with the configured model.
pub fn score_partition(
    partition: &CorpusPartition,
    query: &Query,
    config: &BatchConfig,
) -> Ranking {
    let scores = match config.model {
        Model::Bm25 => bm25_scores(partition, query, config.bm25),
        Model::JmLm => jm_scores(partition, query, config.jm),
        Model::PrfBm25 => {
            let expanded = expand_query(partition, query, config.prf);
            bm25_scores(partition, &expanded, config.bm25)
        }
        Model::PrfJm => {
            let expanded = expand_query(partition, query, config.prf);
            jm_scores(partition, &expanded, config.jm)
        }
    };
    Ranking::from_scores(&scores)
}

/// Run the whole batch: load, score, and (optionally) write a run file for
/// every query, in parallel.
///
/// Returns rankings keyed by query id. Failed partitions are reported and
/// omitted from the result; the batch never aborts as a whole.
pub fn run_batch(
    queries: &[Query],
    source: &TokenSource,
    config: &BatchConfig,
) -> BTreeMap<String, Ranking> {
    let rankings: Vec<(String, Ranking)> = queries
        .par_iter()
        .filter_map(|query| {
            let partition = match load_partition(&config.collection_root, &query.id, source) {
                Ok(partition) => partition,
                Err(e) => {
                    tracing::warn!("skipping partition for query {}: {}", query.id, e);
                    return None;
                }
            };
            let ranking = score_partition(&partition, query, config);

            if let Some(dir) = &config.output_dir {
                if let Err(e) = runs::write_run(dir, config.model.run_tag(), &query.id, &ranking) {
                    tracing::warn!("failed to write run file for query {}: {}", query.id, e);
                }
            }
            Some((query.id.clone(), ranking))
        })
        .collect();

    tracing::info!(
        "batch complete: {} of {} queries ranked",
        rankings.len(),
        queries.len()
    );
    rankings.into_iter().collect()
}
