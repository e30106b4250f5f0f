//! Decoded view of one raw page payload

use crate::page::DEFAULT_PAGE_SIZE;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

/// Why a payload could not be decoded
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Malformed payload: empty content")]
    Empty,

    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One catalog record, kept exactly as the catalog sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `author` field, when it is a string
    pub fn author(&self) -> Option<&str> {
        self.0.get("author").and_then(Value::as_str)
    }

    /// The `title` field, when it is a string
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// The raw record
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default, deserialize_with = "document_count")]
    num_docs: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    docs: Vec<Document>,
}

/// `null` reads as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `null`, non-negative integers and whole non-negative floats
fn document_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(0);
    };

    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
        .ok_or_else(|| D::Error::custom(format!("invalid num_docs: {}", number)))
}

/// One page of search results
///
/// Everything is decoded once in the constructor. A payload that cannot be
/// decoded is logged and behaves like a page with no documents.
#[derive(Debug, Clone)]
pub struct PageResult {
    content: String,
    page_size: u32,
    declared_total: u64,
    documents: Vec<Document>,
}

impl PageResult {
    /// Decodes `content` using the given page size
    ///
    /// A page size of 0 is treated as 1.
    pub fn new(content: impl Into<String>, page_size: u32) -> Self {
        let content = content.into();
        let page_size = page_size.max(1);

        let (declared_total, documents) = match Self::decode(&content) {
            Ok(raw) => (raw.num_docs, raw.docs),
            Err(e) => {
                tracing::warn!(
                    kind = "MalformedPayload",
                    bytes = content.len(),
                    "Discarding page payload: {}",
                    e
                );
                (0, Vec::new())
            }
        };

        Self {
            content,
            page_size,
            declared_total,
            documents,
        }
    }

    /// Decodes `content` with [`DEFAULT_PAGE_SIZE`]
    pub fn with_default_page_size(content: impl Into<String>) -> Self {
        Self::new(content, DEFAULT_PAGE_SIZE)
    }

    fn decode(content: &str) -> Result<RawPage, PayloadError> {
        if content.trim().is_empty() {
            return Err(PayloadError::Empty);
        }
        Ok(serde_json::from_str(content)?)
    }

    /// The raw payload
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Documents on this page, in catalog order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    /// Total number of documents the catalog reports for the whole search
    pub fn declared_total(&self) -> u64 {
        self.declared_total
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of pages the whole search spans
    ///
    /// 0 when this page holds no documents, otherwise
    /// `ceil(declared_total / page_size)`.
    pub fn total_pages(&self) -> u32 {
        if self.documents.is_empty() {
            return 0;
        }
        let pages = self.declared_total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(num_docs: u64, docs: usize) -> String {
        let docs: Vec<Value> = (0..docs)
            .map(|i| json!({"author": format!("Author {}", i), "title": format!("Title {}", i)}))
            .collect();
        json!({ "num_docs": num_docs, "docs": docs }).to_string()
    }

    #[test]
    fn test_empty_payload_has_no_documents() {
        let page = PageResult::with_default_page_size("");
        assert!(page.documents().is_empty());
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_invalid_json_has_no_pages() {
        let page = PageResult::with_default_page_size("not json");
        assert!(page.documents().is_empty());
        assert_eq!(page.total_pages(), 0);
        assert_eq!(page.declared_total(), 0);
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let page = PageResult::with_default_page_size(r#"{"num_docs": 3, "docs": "nope"}"#);
        assert!(page.documents().is_empty());
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PageResult::new(payload(5, 3), 3);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_total_pages_with_default_page_size() {
        assert_eq!(PageResult::with_default_page_size(payload(50, 50)).total_pages(), 1);
        assert_eq!(PageResult::with_default_page_size(payload(51, 50)).total_pages(), 2);
        assert_eq!(PageResult::with_default_page_size(payload(120, 50)).total_pages(), 3);
    }

    #[test]
    fn test_no_documents_means_no_pages() {
        let page = PageResult::new(payload(40, 0), 10);
        assert_eq!(page.declared_total(), 40);
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_missing_fields_default() {
        let page = PageResult::with_default_page_size("{}");
        assert!(page.documents().is_empty());
        assert_eq!(page.declared_total(), 0);

        // Documents without a declared total still yield zero pages
        let page = PageResult::with_default_page_size(r#"{"docs": [{"title": "Solo"}]}"#);
        assert_eq!(page.documents().len(), 1);
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_null_fields_count_as_absent() {
        let page = PageResult::with_default_page_size(r#"{"num_docs": null, "docs": null}"#);
        assert!(page.documents().is_empty());
        assert_eq!(page.declared_total(), 0);

        let page = PageResult::new(r#"{"num_docs": 4, "docs": null}"#, 2);
        assert_eq!(page.declared_total(), 4);
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_float_document_count() {
        let page = PageResult::new(r#"{"num_docs": 12.0, "docs": [{"title": "A"}]}"#, 5);
        assert_eq!(page.documents().len(), 1);
        assert_eq!(page.declared_total(), 12);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_invalid_document_count_is_malformed() {
        for bad in ["-3", "2.5", "\"many\""] {
            let payload = format!(r#"{{"num_docs": {}, "docs": [{{"title": "A"}}]}}"#, bad);
            let page = PageResult::with_default_page_size(payload);
            assert!(page.documents().is_empty(), "{}", bad);
            assert_eq!(page.total_pages(), 0);
        }
    }

    #[test]
    fn test_documents_are_kept_verbatim() {
        let page = PageResult::with_default_page_size(
            r#"{"num_docs": 1, "docs": [{"author": "Machado de Assis", "title": "Dom Casmurro", "year": 1899}]}"#,
        );
        let doc = &page.documents()[0];
        assert_eq!(doc.author(), Some("Machado de Assis"));
        assert_eq!(doc.title(), Some("Dom Casmurro"));
        assert_eq!(doc.as_value()["year"], json!(1899));
    }

    #[test]
    fn test_documents_are_stable() {
        let page = PageResult::new(payload(4, 4), 2);
        let first = page.documents().to_vec();
        let second = page.documents().to_vec();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let page = PageResult::new(payload(3, 3), 0);
        assert_eq!(page.page_size(), 1);
        assert_eq!(page.total_pages(), 3);
    }
}
