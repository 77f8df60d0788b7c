// Loader abstraction for document parsing
//
// This module defines the boundary between container handling (.docx zip ->
// XML parts) and model building (XML parts -> Document). Everything after
// this point works with the Document model and is format-agnostic.

use crate::error::Result;
use crate::types::Document;
use std::path::Path;

/// Raw XML parts pulled out of a document container
#[derive(Debug, Clone)]
pub struct DocumentMarkup {
    /// Main document part (`word/document.xml`)
    pub document_xml: String,
    /// Style definitions (`word/styles.xml`), absent in minimal files
    pub styles_xml: Option<String>,
}

/// DocumentLoader trait - converts document bytes to a Document
///
/// Loading happens in two clear steps:
/// 1. Container -> Markup (e.g., DOCX zip -> document.xml + styles.xml)
/// 2. Markup -> Document (paragraphs, runs and their formatting)
pub trait DocumentLoader {
    /// Step 1: Open the container and extract the XML parts
    fn extract_markup(&self, bytes: &[u8]) -> Result<DocumentMarkup>;

    /// Step 2: Parse the XML parts into the document model
    fn parse_markup(&self, markup: &DocumentMarkup) -> Result<Document>;

    /// Full document loading (combines both steps)
    fn load(&self, bytes: &[u8]) -> Result<Document> {
        let markup = self.extract_markup(bytes)?;
        self.parse_markup(&markup)
    }

    /// Reads the file and loads the bytes
    fn load_file(&self, input: &Path) -> Result<Document> {
        let bytes = std::fs::read(input)?;
        self.load(&bytes)
    }

    /// Loader name for logging
    fn name(&self) -> &str;

    /// Check if the loader supports the given file type
    fn supports_file_type(&self, path: &Path) -> bool;
}
