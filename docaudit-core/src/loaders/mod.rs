//! Document Loaders
//!
//! This module provides the loading layer for turning document files into
//! the `Document` model the checks run on.
//!
//! ## Architecture
//!
//! ```text
//! Document file (.docx)
//!     ↓
//! [Container extraction]
//!     ↓
//! DocumentMarkup (document.xml + styles.xml)
//!     ↓
//! [XML parsing + style resolution]
//!     ↓
//! Document
//! ```

pub mod docx;
pub mod loader;

// Re-export main types
pub use docx::DocxLoader;
pub use loader::{DocumentLoader, DocumentMarkup};
