//! Document service seam: publishing a report through a rich-text document API.
//!
//! The crate does not ship a network client (credential refresh and transport
//! belong to the embedding application). What it ships is the seam: the
//! [`DocumentService`] operations a publisher needs, a [`CredentialsProvider`]
//! capability that yields a connected service — injected rather than read from
//! ambient environment state — and the [`publish`] orchestration that drives
//! translation and request assembly against any service implementation.
//!
//! [`MemoryService`] is a complete in-process implementation. It replays
//! insertions into a plain text buffer, which makes the positional semantics
//! of the request batch — including the reversed block order produced by
//! [`InsertStrategy::Start`] — directly observable in tests.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::export::{InsertStrategy, Request, build_requests};
use crate::report::Report;
use crate::translate::translate;

/// Opaque identifier of a created document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        DocumentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rich-text document API the publisher can drive.
pub trait DocumentService {
    /// Create an empty document with the given title.
    fn create_document(&mut self, title: &str) -> Result<DocumentId>;

    /// Apply a batch of requests to an existing document.
    fn batch_update(&mut self, id: &DocumentId, requests: &[Request]) -> Result<()>;

    /// Grant public read access. Callers treat failure as non-fatal.
    fn share_publicly(&mut self, id: &DocumentId) -> Result<()>;

    /// A human-reachable URL for the document.
    fn document_url(&self, id: &DocumentId) -> String;
}

/// Capability that produces a connected [`DocumentService`].
///
/// Callers take this as a parameter instead of reading credentials from the
/// environment themselves, which keeps translation logic free of ambient
/// configuration state.
pub trait CredentialsProvider {
    type Service: DocumentService;

    /// Obtain a signed, ready-to-use service client.
    fn connect(&self) -> Result<Self::Service>;
}

/// The outcome of a successful publication.
#[derive(Debug, Clone)]
pub struct PublishedDocument {
    pub id: DocumentId,
    pub title: String,
    pub url: String,
}

/// Create a document, translate the report body, and apply the request batch.
///
/// The share step is best-effort: a failure there leaves a private but
/// otherwise complete document. There is no rollback — a document that was
/// created before a later step failed stays created, and the error reports
/// the whole operation as failed.
pub fn publish<S: DocumentService>(
    service: &mut S,
    report: &Report,
    strategy: InsertStrategy,
) -> Result<PublishedDocument> {
    let id = service.create_document(&report.title)?;

    let blocks = translate(&report.body);
    let requests = build_requests(&blocks, strategy);
    if !requests.is_empty() {
        service.batch_update(&id, &requests)?;
    }

    let _ = service.share_publicly(&id);

    let url = service.document_url(&id);
    Ok(PublishedDocument {
        id,
        title: report.title.clone(),
        url,
    })
}

/// A document created in a [`MemoryService`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pub title: String,
    pub text: String,
    pub shared: bool,
    /// Count of style updates applied (the buffer itself stays plain text).
    pub style_updates: usize,
}

/// In-process [`DocumentService`] that replays insertions into text buffers.
#[derive(Debug, Default)]
pub struct MemoryService {
    next_id: usize,
    docs: HashMap<DocumentId, MemoryDocument>,
}

impl MemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self, id: &DocumentId) -> Option<&MemoryDocument> {
        self.docs.get(id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl DocumentService for MemoryService {
    fn create_document(&mut self, title: &str) -> Result<DocumentId> {
        self.next_id += 1;
        let id = DocumentId::new(format!("doc-{}", self.next_id));
        self.docs.insert(
            id.clone(),
            MemoryDocument {
                title: title.to_string(),
                ..MemoryDocument::default()
            },
        );
        Ok(id)
    }

    fn batch_update(&mut self, id: &DocumentId, requests: &[Request]) -> Result<()> {
        let doc = self
            .docs
            .get_mut(id)
            .ok_or_else(|| Error::MissingDocument(id.to_string()))?;

        for request in requests {
            match request {
                Request::InsertText { location, text } => {
                    insert_at_index(&mut doc.text, location.index, text);
                }
                Request::UpdateTextStyle { .. } => doc.style_updates += 1,
            }
        }
        Ok(())
    }

    fn share_publicly(&mut self, id: &DocumentId) -> Result<()> {
        let doc = self
            .docs
            .get_mut(id)
            .ok_or_else(|| Error::MissingDocument(id.to_string()))?;
        doc.shared = true;
        Ok(())
    }

    fn document_url(&self, id: &DocumentId) -> String {
        format!("memory://{id}")
    }
}

/// Insert text at a 1-based character index; index 1 is the start of the body.
/// Out-of-range indices clamp to the end of the buffer.
fn insert_at_index(buffer: &mut String, index: usize, text: &str) {
    let at = index.saturating_sub(1);
    let byte = buffer
        .char_indices()
        .nth(at)
        .map(|(i, _)| i)
        .unwrap_or(buffer.len());
    buffer.insert_str(byte, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_strategy_reverses_block_order() {
        let mut service = MemoryService::new();
        let report = Report::new("Findings", "a\nb\nc");
        let published = publish(&mut service, &report, InsertStrategy::Start).unwrap();

        let doc = service.document(&published.id).unwrap();
        assert_eq!(doc.text, "c\nb\na\n");
    }

    #[test]
    fn test_append_strategy_preserves_block_order() {
        let mut service = MemoryService::new();
        let report = Report::new("Findings", "a\nb\nc");
        let published = publish(&mut service, &report, InsertStrategy::Append).unwrap();

        let doc = service.document(&published.id).unwrap();
        assert_eq!(doc.text, "a\nb\nc\n");
    }

    #[test]
    fn test_publish_records_title_and_share() {
        let mut service = MemoryService::new();
        let report = Report::new("Quarterly Report", "# Summary\nfine\n");
        let published = publish(&mut service, &report, InsertStrategy::Append).unwrap();

        assert_eq!(published.title, "Quarterly Report");
        assert_eq!(published.url, format!("memory://{}", published.id));

        let doc = service.document(&published.id).unwrap();
        assert_eq!(doc.title, "Quarterly Report");
        assert!(doc.shared);
        assert_eq!(doc.style_updates, 1);
    }

    #[test]
    fn test_empty_body_still_inserts_blank_line() {
        let mut service = MemoryService::new();
        let report = Report::new("Empty", "");
        let published = publish(&mut service, &report, InsertStrategy::Start).unwrap();

        let doc = service.document(&published.id).unwrap();
        assert_eq!(doc.text, "\n");
    }

    #[test]
    fn test_batch_update_unknown_document() {
        let mut service = MemoryService::new();
        let missing = DocumentId::new("doc-404");
        let err = service.batch_update(&missing, &[]).unwrap_err();
        assert!(matches!(err, Error::MissingDocument(_)));
    }

    #[test]
    fn test_credentials_provider_connects() {
        struct Static;

        impl CredentialsProvider for Static {
            type Service = MemoryService;

            fn connect(&self) -> crate::Result<MemoryService> {
                Ok(MemoryService::new())
            }
        }

        let mut service = Static.connect().unwrap();
        let report = Report::new("t", "hello");
        publish(&mut service, &report, InsertStrategy::Start).unwrap();
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn test_insert_at_index_clamps() {
        let mut buffer = String::from("ab");
        insert_at_index(&mut buffer, 99, "!");
        assert_eq!(buffer, "ab!");
    }
}
