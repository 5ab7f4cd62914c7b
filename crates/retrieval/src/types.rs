//! Documents and pipeline results.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Metadata key holding the path a document was loaded from.
pub const SOURCE_KEY: &str = "source";

/// Metadata key holding the number of pages merged into a document.
pub const PAGES_KEY: &str = "pages";

/// Full text of one file plus provenance metadata.
///
/// Fields are private: a document is fixed once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    content: String,
    metadata: BTreeMap<String, Value>,
}

impl Document {
    /// Document with `content` whose `source` is `source`.
    pub fn new(content: impl Into<String>, source: impl AsRef<Path>) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            SOURCE_KEY.to_string(),
            Value::String(source.as_ref().to_string_lossy().into_owned()),
        );

        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Merge per-page texts into one document, pages joined by `\n` in order.
    pub fn from_pages<S: AsRef<str>>(pages: &[S], source: impl AsRef<Path>) -> Self {
        let content = pages
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");

        Self::new(content, source).with_metadata(PAGES_KEY, Value::from(pages.len()))
    }

    /// Add a metadata entry while building the document.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Full text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// All metadata.
    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Path the document was loaded from.
    pub fn source(&self) -> &str {
        self.metadata
            .get(SOURCE_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Outcome of one question-answering run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaRun {
    /// Raw model answer
    pub answer: String,

    /// Keywords the search was built from
    pub keywords: Vec<String>,

    /// Every search hit, in the order the search facility returned them
    pub hits: Vec<PathBuf>,

    /// Sources of the documents that were given to the model
    pub documents: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_records_source() {
        let doc = Document::new("text", "/resumes/a.pdf");
        assert_eq!(doc.content(), "text");
        assert_eq!(doc.source(), "/resumes/a.pdf");
        assert_eq!(doc.metadata().len(), 1);
    }

    #[test]
    fn test_from_pages_joins_with_newline() {
        let doc = Document::from_pages(&["page one", "page two", "page three"], "/r/b.pdf");
        assert_eq!(doc.content(), "page one\npage two\npage three");
        assert_eq!(doc.metadata()[PAGES_KEY], 3);
        assert_eq!(doc.source(), "/r/b.pdf");
    }

    #[test]
    fn test_from_no_pages() {
        let doc = Document::from_pages::<&str>(&[], "/r/empty.pdf");
        assert_eq!(doc.content(), "");
        assert_eq!(doc.metadata()[PAGES_KEY], 0);
    }

    #[test]
    fn test_document_serializes_metadata() {
        let doc = Document::new("A", "/x.pdf");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["content"], "A");
        assert_eq!(json["metadata"]["source"], "/x.pdf");
    }
}
