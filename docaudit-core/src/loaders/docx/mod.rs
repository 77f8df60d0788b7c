//! DOCX Loader
//!
//! Opens the OPC zip container, locates the main document part through the
//! package relationships, and parses document.xml with the style sheet from
//! styles.xml.

pub mod properties;
pub mod styles;
pub mod xml_parser;

use crate::error::{AuditError, Result};
use crate::loaders::loader::{DocumentLoader, DocumentMarkup};
use crate::types::Document;
use properties::attribute;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

pub use styles::{parse_styles_xml, StyleSheet};
pub use xml_parser::parse_document_xml;

const PACKAGE_RELATIONSHIPS: &str = "_rels/.rels";
const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";
const OFFICE_DOCUMENT_REL_SUFFIX: &str = "/officeDocument";

/// Loader for WordprocessingML packages (.docx / .docm)
#[derive(Debug, Clone, Default)]
pub struct DocxLoader {
    inherit_styles: bool,
}

impl DocxLoader {
    /// Loader that reads direct formatting only
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader that optionally resolves unset formatting through styles
    pub fn with_style_inheritance(inherit_styles: bool) -> Self {
        Self { inherit_styles }
    }
}

impl DocumentLoader for DocxLoader {
    fn extract_markup(&self, bytes: &[u8]) -> Result<DocumentMarkup> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let document_part = match read_part(&mut archive, PACKAGE_RELATIONSHIPS)? {
            Some(rels) => locate_main_document(&rels)?
                .unwrap_or_else(|| DEFAULT_DOCUMENT_PART.to_string()),
            None => DEFAULT_DOCUMENT_PART.to_string(),
        };

        let document_xml = read_part(&mut archive, &document_part)?
            .ok_or_else(|| AuditError::MissingPart(document_part.clone()))?;
        let styles_xml = read_part(&mut archive, &sibling_part(&document_part, "styles.xml"))?;

        Ok(DocumentMarkup {
            document_xml,
            styles_xml,
        })
    }

    fn parse_markup(&self, markup: &DocumentMarkup) -> Result<Document> {
        let styles = match &markup.styles_xml {
            Some(xml) => parse_styles_xml(xml)?,
            None => {
                println!("⚠️  No styles part found - using built-in style names");
                StyleSheet::default()
            }
        };

        let document = parse_document_xml(&markup.document_xml, &styles, self.inherit_styles)?;

        println!(
            "✅ DOCX parsing complete: {} paragraphs, {} runs, {} styles",
            document.paragraphs.len(),
            document.paragraphs.iter().map(|p| p.runs.len()).sum::<usize>(),
            styles.len()
        );

        Ok(document)
    }

    fn name(&self) -> &str {
        "DocxLoader"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        if let Some(extension) = path.extension() {
            matches!(
                extension.to_str().unwrap_or("").to_lowercase().as_str(),
                "docx" | "docm"
            )
        } else {
            false
        }
    }
}

/// Read a part as UTF-8 text; `None` when the archive has no such entry
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            Ok(Some(content))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find the officeDocument target in the package relationships
fn locate_main_document(rels_xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(rels_xml);
    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                let is_office_document = attribute(&e, "Type")?
                    .is_some_and(|kind| kind.ends_with(OFFICE_DOCUMENT_REL_SUFFIX));
                if is_office_document {
                    return Ok(attribute(&e, "Target")?
                        .map(|target| target.trim_start_matches('/').to_string()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Path of `file_name` in the same folder as `part`
fn sibling_part(part: &str, file_name: &str) -> String {
    match part.rfind('/') {
        Some(index) => format!("{}/{}", &part[..index], file_name),
        None => file_name.to_string(),
    }
}
