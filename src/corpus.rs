//! Per-partition corpus statistics.
//!
//! A [`CorpusPartition`] holds the documents associated with one query's
//! scope together with the aggregates every scorer needs: document count,
//! average document length, per-term document frequency (`df`), per-term
//! collection frequency (`cf`), and total collection length. Statistics are
//! computed once at construction and immutable afterwards.

use crate::error::Error;
use std::collections::HashMap;

/// A single document: id, ordered token sequence, and precomputed counts.
///
/// Immutable after construction; owned by its [`CorpusPartition`].
#[derive(Debug, Clone)]
pub struct Document {
    /// Document identifier (file stem in the on-disk layout).
    pub id: String,
    /// Ordered, normalized token sequence.
    pub tokens: Vec<String>,
    term_counts: HashMap<String, u32>,
}

impl Document {
    /// Build a document from an id and its token stream.
    pub fn new(id: impl Into<String>, tokens: Vec<String>) -> Self {
        let mut term_counts: HashMap<String, u32> = HashMap::new();
        for token in &tokens {
            *term_counts.entry(token.clone()).or_insert(0) += 1;
        }
        Self {
            id: id.into(),
            tokens,
            term_counts,
        }
    }

    /// Document length in tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the document has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Occurrences of `term` in this document (0 if absent).
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }
}

/// An IR query: identifier plus ordered token sequence.
///
/// Duplicate tokens are preserved; term frequency inside a query matters for
/// BM25's `qf` component and for PRF expansion.
#[derive(Debug, Clone)]
pub struct Query {
    /// Query identifier (e.g. `R104`).
    pub id: String,
    /// Ordered, normalized token sequence, duplicates preserved.
    pub tokens: Vec<String>,
}

impl Query {
    /// Build a query from an id and its token stream.
    pub fn new(id: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            id: id.into(),
            tokens,
        }
    }

    /// Occurrences of `term` in the query token sequence.
    pub fn term_count(&self, term: &str) -> u32 {
        self.tokens.iter().filter(|t| *t == term).count() as u32
    }
}

/// The document set for one query's scope, with precomputed aggregates.
///
/// Invariants (checked in tests): `df[t] <= N`, `cf[t] >= df[t]`,
/// `avgdl = L / N`. Construction fails with [`Error::EmptyCorpus`] when
/// `N = 0` rather than dividing by zero.
#[derive(Debug)]
pub struct CorpusPartition {
    documents: Vec<Document>,
    doc_freq: HashMap<String, u32>,
    coll_freq: HashMap<String, u64>,
    total_len: u64,
    avgdl: f64,
}

impl CorpusPartition {
    /// Aggregate statistics from `(doc id, token sequence)` pairs.
    ///
    /// Documents are stored sorted by id so iteration order is reproducible.
    /// `df` counts distinct-term presence per document; `cf` sums raw term
    /// occurrences across all documents.
    pub fn from_documents(
        docs: impl IntoIterator<Item = (String, Vec<String>)>,
    ) -> Result<Self, Error> {
        let mut documents: Vec<Document> = docs
            .into_iter()
            .map(|(id, tokens)| Document::new(id, tokens))
            .collect();
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        documents.sort_by(|a, b| a.id.cmp(&b.id));

        let mut doc_freq: HashMap<String, u32> = HashMap::new();
        let mut coll_freq: HashMap<String, u64> = HashMap::new();
        let mut total_len: u64 = 0;

        for doc in &documents {
            total_len += doc.len() as u64;
            for (term, &count) in &doc.term_counts {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
                *coll_freq.entry(term.clone()).or_insert(0) += u64::from(count);
            }
        }

        let avgdl = total_len as f64 / documents.len() as f64;

        Ok(Self {
            documents,
            doc_freq,
            coll_freq,
            total_len,
            avgdl,
        })
    }

    /// Number of documents `N` in the partition.
    pub fn num_docs(&self) -> usize {
        self.documents.len()
    }

    /// Average document length in tokens.
    pub fn avgdl(&self) -> f64 {
        self.avgdl
    }

    /// Total collection length `L` (sum of document lengths).
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Document frequency of `term`: documents containing it at least once.
    pub fn doc_freq(&self, term: &str) -> u32 {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Collection frequency of `term`: total occurrences across documents.
    pub fn coll_freq(&self, term: &str) -> u64 {
        self.coll_freq.get(term).copied().unwrap_or(0)
    }

    /// Iterate documents in id order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ {
        self.documents.iter()
    }

    /// Look up a document by id.
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents
            .binary_search_by(|d| d.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.documents[i])
    }
}
