//! Ingestion sinks

use crate::page::Document;

/// Receives the documents of one stored page during a replay
///
/// Implemented for any `FnMut(&[Document]) -> usize` closure.
pub trait IngestSink {
    /// Ingests `documents` and returns how many were accepted
    fn ingest(&mut self, documents: &[Document]) -> usize;
}

impl<F> IngestSink for F
where
    F: FnMut(&[Document]) -> usize,
{
    fn ingest(&mut self, documents: &[Document]) -> usize {
        self(documents)
    }
}

/// Accepts every document and keeps running totals
#[derive(Debug, Clone, Default)]
pub struct CountingSink {
    documents: usize,
    batches: usize,
    with_author: usize,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents accepted so far
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Number of pages handed to the sink, empty ones included
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Accepted documents that carry a string `author`
    pub fn with_author(&self) -> usize {
        self.with_author
    }
}

impl IngestSink for CountingSink {
    fn ingest(&mut self, documents: &[Document]) -> usize {
        self.batches += 1;
        self.documents += documents.len();
        self.with_author += documents.iter().filter(|d| d.author().is_some()).count();
        documents.len()
    }
}
