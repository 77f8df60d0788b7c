use thiserror::Error;

/// Errors raised while loading a document or writing a report.
///
/// Underlying I/O, archive and XML errors are carried unchanged so callers
/// can inspect the original cause.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Document part not found: {0}")]
    MissingPart(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
