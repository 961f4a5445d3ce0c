use std::path::Path;

use tracing::{info, warn};

use super::document::BlogDocument;
use crate::error::ImportError;

/// Destination for a finished import. One call per submit, no retries.
pub trait DocumentSink {
    async fn submit_document(&self, document: &BlogDocument) -> Result<(), ImportError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImportState {
    #[default]
    Idle,
    Parsed(BlogDocument),
    Submitting(BlogDocument),
}

/// One import screen: parse a file, preview it, submit it.
///
/// A new parse replaces the current document in place. A failed submit
/// keeps the document so it can be resubmitted without re-parsing.
#[derive(Debug, Default)]
pub struct ImportSession {
    state: ImportState,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    pub fn document(&self) -> Option<&BlogDocument> {
        match &self.state {
            ImportState::Parsed(doc) | ImportState::Submitting(doc) => Some(doc),
            ImportState::Idle => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, ImportState::Submitting(_))
    }

    pub fn parse_file(&mut self, path: Option<&Path>) -> Result<&BlogDocument, ImportError> {
        let path = path.ok_or(ImportError::NoFileSelected)?;
        if self.is_submitting() {
            return Err(ImportError::SubmitInFlight);
        }
        let text = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Parsing {}", path.display());
        self.parse_text(&text)
    }

    pub fn parse_text(&mut self, text: &str) -> Result<&BlogDocument, ImportError> {
        if self.is_submitting() {
            return Err(ImportError::SubmitInFlight);
        }
        let doc = super::import_text(text);
        self.state = ImportState::Parsed(doc);
        self.document().ok_or(ImportError::NoDocumentToSubmit)
    }

    /// Move `Parsed → Submitting` and hand out the payload to send.
    pub fn begin_submit(&mut self) -> Result<BlogDocument, ImportError> {
        match std::mem::take(&mut self.state) {
            ImportState::Parsed(doc) => {
                self.state = ImportState::Submitting(doc.clone());
                Ok(doc)
            }
            ImportState::Submitting(doc) => {
                self.state = ImportState::Submitting(doc);
                Err(ImportError::SubmitInFlight)
            }
            ImportState::Idle => Err(ImportError::NoDocumentToSubmit),
        }
    }

    /// Success starts a fresh cycle; failure returns to `Parsed` with the same document.
    pub fn complete_submit(&mut self, result: Result<(), ImportError>) -> Result<(), ImportError> {
        let doc = match std::mem::take(&mut self.state) {
            ImportState::Submitting(doc) => doc,
            other => {
                self.state = other;
                return Err(ImportError::NoDocumentToSubmit);
            }
        };
        match result {
            Ok(()) => {
                info!("Blog \"{}\" submitted", doc.title);
                Ok(())
            }
            Err(e) => {
                warn!("Submit of \"{}\" failed: {}", doc.title, e);
                self.state = ImportState::Parsed(doc);
                Err(e)
            }
        }
    }

    pub async fn submit<S: DocumentSink>(&mut self, sink: &S) -> Result<(), ImportError> {
        let doc = self.begin_submit()?;
        let result = sink.submit_document(&doc).await;
        self.complete_submit(result)
    }
}

// ── Tests ──
