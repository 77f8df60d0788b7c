use crate::types::Alignment;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

// Default value functions for serde
fn default_true() -> bool {
    true
}

/// Names of the rules the engine knows how to run
pub mod rule_names {
    pub const TEXT_FORMAT: &str = "TextFormat";
    pub const TABLE_OF_CONTENTS: &str = "TableOfContents";
    pub const REFERENCES: &str = "References";
    pub const FIGURES: &str = "Figures";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub text_format: TextFormatRules,
    #[serde(default)]
    pub table_of_contents: TableOfContentsRules,
    #[serde(default)]
    pub references: ReferenceRules,
    #[serde(default)]
    pub figures: FigureRules,
    /// Resolve unset formatting through styles and document defaults
    #[serde(default)]
    pub inherit_styles: bool,
    /// Show console progress bars while checking
    #[serde(default = "default_true")]
    pub show_progress: bool,
    /// Pipeline configuration - defines which checks to run and in what order
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Expected body-text formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFormatRules {
    pub expected_font: String,
    /// Points
    pub expected_size: f64,
    /// Inclusive lower bound for the first-line indent, in centimeters
    pub indent_min: f64,
    /// Inclusive upper bound for the first-line indent, in centimeters
    pub indent_max: f64,
    pub alignment: Alignment,
    /// Points
    pub spacing_before: f64,
    /// Points
    pub spacing_after: f64,
}

impl TextFormatRules {
    pub fn new(
        expected_font: &str,
        expected_size: f64,
        indent_min: f64,
        indent_max: f64,
        alignment: Alignment,
        spacing_before: f64,
        spacing_after: f64,
    ) -> Self {
        Self {
            expected_font: expected_font.to_string(),
            expected_size,
            indent_min,
            indent_max,
            alignment,
            spacing_before,
            spacing_after,
        }
    }
}

impl Default for TextFormatRules {
    fn default() -> Self {
        Self::new("Times New Roman", 14.0, 1.25, 1.5, Alignment::Justify, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOfContentsRules {
    /// Paragraphs whose style name starts with this prefix count as headings
    pub heading_style_prefix: String,
}

impl Default for TableOfContentsRules {
    fn default() -> Self {
        Self {
            heading_style_prefix: "Heading".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceRules {
    /// Text that opens the reference list
    pub section_marker: String,
}

impl Default for ReferenceRules {
    fn default() -> Self {
        Self {
            section_marker: "Список джерел".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureRules {
    /// Text that marks a figure caption
    pub caption_marker: String,
}

impl Default for FigureRules {
    fn default() -> Self {
        Self {
            caption_marker: "Рисунок".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// List of checks to run in order
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Name of the rule
    pub name: String,
    /// Whether this rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl RuleConfig {
    fn enabled(name: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                RuleConfig::enabled(rule_names::TEXT_FORMAT),
                RuleConfig::enabled(rule_names::TABLE_OF_CONTENTS),
                RuleConfig::enabled(rule_names::REFERENCES),
                RuleConfig::enabled(rule_names::FIGURES),
            ],
        }
    }
}

impl AuditConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AuditConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                eprintln!("⚠️  Failed to load config from {}: {e}, using defaults", p);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            text_format: TextFormatRules::default(),
            table_of_contents: TableOfContentsRules::default(),
            references: ReferenceRules::default(),
            figures: FigureRules::default(),
            inherit_styles: false,
            show_progress: true,
            pipeline: PipelineConfig::default(),
        }
    }
}
