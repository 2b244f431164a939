//! Ranking run file output.
//!
//! One file per (model, query) pair, named `<prefix><queryId>Ranking.dat`.
//! Each line is `documentId<sep>score` where the separator is fixed per
//! model (space for BM25, tab for the language model and PRF runs). Lines
//! follow the canonical ranking order: score descending, ties by ascending
//! document id.

use crate::scoring::Ranking;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Which run family a ranking file belongs to.
///
/// Determines the output file name prefix and the column separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTag {
    /// BM25 runs: `BM25_<qid>Ranking.dat`, space-separated.
    Bm25,
    /// Jelinek-Mercer LM runs: `JM_LM_<qid>Ranking.dat`, tab-separated.
    JmLm,
    /// PRF-expanded runs: `My_PRM_<qid>Ranking.dat`, tab-separated.
    Prf,
}

impl RunTag {
    /// File name prefix for this run family.
    pub fn prefix(self) -> &'static str {
        match self {
            RunTag::Bm25 => "BM25_",
            RunTag::JmLm => "JM_LM_",
            RunTag::Prf => "My_PRM_",
        }
    }

    /// Column separator, fixed per model.
    pub fn separator(self) -> char {
        match self {
            RunTag::Bm25 => ' ',
            RunTag::JmLm | RunTag::Prf => '\t',
        }
    }

    /// Run file name for a query.
    pub fn file_name(self, query_id: &str) -> String {
        format!("{}{}Ranking.dat", self.prefix(), query_id)
    }
}

/// Write one ranking to `<dir>/<prefix><queryId>Ranking.dat`.
///
/// Creates the directory if needed. Returns the written path.
pub fn write_run(
    dir: &Path,
    tag: RunTag,
    query_id: &str,
    ranking: &Ranking,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(tag.file_name(query_id));

    let sep = tag.separator();
    let mut out = String::new();
    for (doc_id, score) in ranking.entries() {
        out.push_str(doc_id);
        out.push(sep);
        out.push_str(&score.to_string());
        out.push('\n');
    }
    fs::write(&path, out)?;
    tracing::debug!(
        "wrote {} lines to {:?}",
        ranking.len(),
        path.file_name().unwrap_or_default()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoredList;

    fn ranking() -> Ranking {
        let mut scores = ScoredList::new();
        scores.insert("docB", 1.5);
        scores.insert("docA", 1.5);
        scores.insert("docC", 3.0);
        Ranking::from_scores(&scores)
    }

    #[test]
    fn file_names_follow_model_prefix() {
        assert_eq!(RunTag::Bm25.file_name("R101"), "BM25_R101Ranking.dat");
        assert_eq!(RunTag::JmLm.file_name("R101"), "JM_LM_R101Ranking.dat");
        assert_eq!(RunTag::Prf.file_name("R101"), "My_PRM_R101Ranking.dat");
    }

    #[test]
    fn bm25_run_is_space_separated_and_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_run(dir.path(), RunTag::Bm25, "R101", &ranking()).unwrap();
        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("docC "));
        // Equal scores: ascending doc id.
        assert!(lines[1].starts_with("docA "));
        assert!(lines[2].starts_with("docB "));
    }

    #[test]
    fn jm_run_is_tab_separated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_run(dir.path(), RunTag::JmLm, "R102", &ranking()).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.lines().all(|l| l.contains('\t')));
    }
}
