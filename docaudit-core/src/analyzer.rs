use crate::config::{AuditConfig, TextFormatRules};
use crate::error::{AuditError, Result};
use crate::loaders::{DocumentLoader, DocxLoader};
use crate::report::write_report_file;
use crate::rules::{CheckRule, FiguresRule, ReferencesRule, TableOfContentsRule, TextFormatRule};
use crate::types::*;
use std::path::Path;

/// Holds one loaded document and the findings accumulated while checking it.
///
/// Findings are appended in the order checks are invoked and paragraphs are
/// visited; nothing is deduplicated.
pub struct DocumentAnalyzer {
    document: Document,
    config: AuditConfig,
    findings: Vec<Finding>,
}

impl DocumentAnalyzer {
    /// Load `file_path` with the default rules
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(file_path, AuditConfig::default())
    }

    /// Load `file_path`; loader errors are returned unchanged
    pub fn with_config(file_path: impl AsRef<Path>, config: AuditConfig) -> Result<Self> {
        let file_path = file_path.as_ref();
        let loader = DocxLoader::with_style_inheritance(config.inherit_styles);
        if !loader.supports_file_type(file_path) {
            return Err(AuditError::UnsupportedFile(file_path.display().to_string()));
        }
        println!("📄 Loading {} with {}", file_path.display(), loader.name());
        let document = loader.load_file(file_path)?;
        Ok(Self::from_document(document, config))
    }

    /// Wrap an already loaded document
    pub fn from_document(document: Document, config: AuditConfig) -> Self {
        Self {
            document,
            config,
            findings: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn summary(&self) -> FindingSummary {
        FindingSummary::from_findings(&self.findings)
    }

    /// Drop accumulated findings to start a new session over the same document
    pub fn clear_findings(&mut self) {
        self.findings.clear();
    }

    /// Font, alignment, first-line indent and spacing of every paragraph
    pub fn check_text_format(&mut self, rules: &TextFormatRules) {
        let rule = TextFormatRule::new(rules);
        rule.check(&self.document, &mut self.findings, self.config.show_progress);
    }

    /// Heading numbering against position among headings
    pub fn check_table_of_contents(&mut self) {
        let rule = TableOfContentsRule::new(&self.config.table_of_contents);
        rule.check(&self.document, &mut self.findings, self.config.show_progress);
    }

    /// Reference list format from the section marker to document end
    pub fn check_references(&mut self) {
        let rule = ReferencesRule::new(&self.config.references);
        rule.check(&self.document, &mut self.findings, self.config.show_progress);
    }

    /// Figure captions must be centered
    pub fn check_figures(&mut self) {
        let rule = FiguresRule::new(&self.config.figures);
        rule.check(&self.document, &mut self.findings, self.config.show_progress);
    }

    /// Write accumulated findings to `output_file`, overwriting it
    pub fn generate_report(&self, output_file: impl AsRef<Path>) -> Result<()> {
        write_report_file(&self.findings, output_file.as_ref())?;
        Ok(())
    }
}
