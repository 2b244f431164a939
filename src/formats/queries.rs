//! TREC-style topic file parsing.
//!
//! A topic file is a sequence of `<Query> ... </Query>` records. Each record
//! carries a `<num> Number: R<digits>` identifier and a `<title>` line, plus
//! optional `<desc> Description:` and `<narr> Narrative:` sections. A record
//! missing its number or title is rejected (that record only); missing
//! optional sections degrade to empty strings.

use crate::corpus::Query;
use crate::error::Error;
use crate::tokenizer::TokenSource;
use regex::Regex;
use std::sync::LazyLock;

static RECORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<Query>(.*?)</Query>").expect("valid record regex"));
static NUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<num>\s*Number:\s*(R\d+)").expect("valid num regex"));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>[ \t]*([^\r\n]+)").expect("valid title regex"));
static DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<desc>\s*Description:\s*(.*?)\s*(?:<narr>|\z)").expect("valid desc regex")
});
static NARR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<narr>\s*Narrative:\s*(.*?)\s*\z").expect("valid narr regex")
});

/// Which topic fields feed the query token sequence.
///
/// The title alone is the conventional short-query setup; `Full`
/// concatenates title, description, and narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryFields {
    /// Title text only.
    #[default]
    TitleOnly,
    /// Title, description, and narrative concatenated.
    Full,
}

/// One parsed topic record, fields still raw (untokenized).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRecord {
    /// Query identifier, e.g. `R104`.
    pub id: String,
    /// Title line (required).
    pub title: String,
    /// Description section, empty string when absent.
    pub description: String,
    /// Narrative section, empty string when absent.
    pub narrative: String,
}

impl TopicRecord {
    /// Tokenize the selected fields into a [`Query`].
    pub fn to_query(&self, source: &TokenSource, fields: QueryFields) -> Query {
        let text = match fields {
            QueryFields::TitleOnly => self.title.clone(),
            QueryFields::Full => {
                format!("{} {} {}", self.title, self.description, self.narrative)
            }
        };
        Query::new(self.id.clone(), source.tokenize(&text))
    }
}

/// Parse a single record body (the text between `<Query>` and `</Query>`).
pub fn parse_topic_record(body: &str) -> Result<TopicRecord, Error> {
    let id = NUM_RE
        .captures(body)
        .map(|c| c[1].to_string())
        .ok_or_else(|| Error::MalformedQueryRecord {
            detail: "missing <num> Number: R<digits> field".to_string(),
        })?;
    let title = TITLE_RE
        .captures(body)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::MalformedQueryRecord {
            detail: format!("record {}: missing <title> field", id),
        })?;
    let description = DESC_RE
        .captures(body)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();
    let narrative = NARR_RE
        .captures(body)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();

    Ok(TopicRecord {
        id,
        title,
        description,
        narrative,
    })
}

/// Parse every record in a topic file.
///
/// Malformed records are logged and skipped; parsing always continues with
/// the next record.
pub fn parse_topics(content: &str) -> Vec<TopicRecord> {
    let mut records = Vec::new();
    for capture in RECORD_RE.captures_iter(content) {
        match parse_topic_record(&capture[1]) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("skipping topic record: {}", e),
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
<Query>
<num> Number: R101
<title> Economic espionage

<desc> Description:
What is being done to counter economic espionage internationally?

<narr> Narrative:
Documents which identify economic espionage cases are relevant.
</Query>

<Query>
<num> Number: R102
<title> Trade sanctions
</Query>
";

    #[test]
    fn parses_all_fields() {
        let records = parse_topics(SAMPLE);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, "R101");
        assert_eq!(first.title, "Economic espionage");
        assert!(first.description.starts_with("What is being done"));
        assert!(first.narrative.contains("espionage cases"));
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let records = parse_topics(SAMPLE);
        let second = &records[1];
        assert_eq!(second.id, "R102");
        assert_eq!(second.title, "Trade sanctions");
        assert_eq!(second.description, "");
        assert_eq!(second.narrative, "");
    }

    #[test]
    fn missing_title_rejects_only_that_record() {
        let content = "\
<Query>
<num> Number: R103
</Query>
<Query>
<num> Number: R104
<title> Valid record
</Query>
";
        let records = parse_topics(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "R104");

        let err = parse_topic_record("<num> Number: R103\n");
        assert!(matches!(err, Err(Error::MalformedQueryRecord { .. })));
    }

    #[test]
    fn missing_number_is_malformed() {
        let err = parse_topic_record("<title> No number here\n");
        assert!(matches!(err, Err(Error::MalformedQueryRecord { .. })));
    }

    #[test]
    fn field_selection_controls_query_tokens() {
        let records = parse_topics(SAMPLE);
        let source = TokenSource::new();
        let title_only = records[0].to_query(&source, QueryFields::TitleOnly);
        let full = records[0].to_query(&source, QueryFields::Full);
        assert_eq!(title_only.id, "R101");
        assert!(full.tokens.len() > title_only.tokens.len());
        // "espionage" appears in title and narrative, so Full keeps both.
        let stem = "espionag";
        assert_eq!(title_only.tokens.iter().filter(|t| *t == stem).count(), 1);
        assert!(full.tokens.iter().filter(|t| *t == stem).count() >= 2);
    }
}
