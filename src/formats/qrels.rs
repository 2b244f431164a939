//! Relevance judgment loading.
//!
//! Judgments are plain-text lines of `queryId documentId relevance` with
//! relevance in `{0, 1}`, one file per partition (`Dataset<nnn>.txt`). All
//! files are merged into one lookup table, loaded once per evaluation and
//! read-only thereafter (safe to share across parallel workers).

use crate::error::Error;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Lookup table: query id → (document id → binary relevance).
#[derive(Debug, Default)]
pub struct RelevanceJudgments {
    table: HashMap<String, HashMap<String, u8>>,
}

impl RelevanceJudgments {
    /// Build a table from `(query id, doc id, relevance)` triples.
    pub fn from_triples(triples: impl IntoIterator<Item = (String, String, u8)>) -> Self {
        let mut table: HashMap<String, HashMap<String, u8>> = HashMap::new();
        for (query_id, doc_id, relevance) in triples {
            table.entry(query_id).or_default().insert(doc_id, relevance);
        }
        Self { table }
    }

    /// Parse one judgment file.
    pub fn parse_str(content: &str, path: &Path) -> Result<Vec<(String, String, u8)>, Error> {
        let mut triples = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (Some(query_id), Some(doc_id), Some(rel)) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(Error::MalformedQrelsLine {
                    path: path.to_path_buf(),
                    line: i + 1,
                    detail: "expected 'queryId docId relevance'".to_string(),
                });
            };
            let relevance: u8 = match rel {
                "0" => 0,
                "1" => 1,
                other => {
                    return Err(Error::MalformedQrelsLine {
                        path: path.to_path_buf(),
                        line: i + 1,
                        detail: format!("relevance must be 0 or 1, got '{}'", other),
                    })
                }
            };
            triples.push((query_id.to_string(), doc_id.to_string(), relevance));
        }
        Ok(triples)
    }

    /// Load and merge every `.txt` judgment file in a directory.
    ///
    /// Files that fail to read or parse are logged and skipped.
    pub fn load_dir(dir: &Path) -> Result<Self, Error> {
        let mut triples = Vec::new();
        let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
        entries.sort_by_key(|e| e.path());
        for entry in entries {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("txt") {
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(content) => match Self::parse_str(&content, &path) {
                    Ok(mut file_triples) => triples.append(&mut file_triples),
                    Err(e) => tracing::warn!("skipping qrels file {:?}: {}", path, e),
                },
                Err(e) => tracing::warn!("failed to read qrels file {:?}: {}", path, e),
            }
        }
        let judgments = Self::from_triples(triples);
        tracing::info!(
            "loaded judgments for {} queries from {:?}",
            judgments.table.len(),
            dir
        );
        Ok(judgments)
    }

    /// Whether any judgments exist for a query.
    pub fn has_query(&self, query_id: &str) -> bool {
        self.table.contains_key(query_id)
    }

    /// Ids of documents judged relevant (relevance = 1) for a query.
    ///
    /// `None` when the query has no judgments at all, which evaluation
    /// treats as "excluded", not as "nothing relevant".
    pub fn relevant_docs(&self, query_id: &str) -> Option<HashSet<&str>> {
        self.table.get(query_id).map(|docs| {
            docs.iter()
                .filter(|(_, &rel)| rel == 1)
                .map(|(doc_id, _)| doc_id.as_str())
                .collect()
        })
    }

    /// Number of queries with judgments.
    pub fn num_queries(&self) -> usize {
        self.table.len()
    }
}
