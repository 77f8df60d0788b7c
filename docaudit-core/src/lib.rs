// Docaudit Core Library
//
// Loads .docx documents into a paragraph/run model and checks them against
// formatting rules, accumulating findings into a plain-text report.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod loaders;
pub mod report;
pub mod rules;
pub mod types;

// Re-export main types and functions for easy use
pub use analyzer::DocumentAnalyzer;
pub use config::{AuditConfig, TextFormatRules};
pub use error::{AuditError, Result};
pub use loaders::{DocumentLoader, DocxLoader};
pub use rules::{DebugConfig, RuleEngine};
pub use types::*;
