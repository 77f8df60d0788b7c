use serde::{Deserialize, Serialize};
use std::fmt;

// ===== LENGTH UNITS =====
// Values are stored in the units the .docx XML uses and converted only when
// a rule compares them.

/// Twentieths of a point, used for indents and paragraph spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Twips(pub i32);

impl Twips {
    pub const PER_POINT: f64 = 20.0;
    /// English Metric Units per twip
    pub const EMU_PER_TWIP: f64 = 635.0;
    /// English Metric Units per centimeter
    pub const EMU_PER_CM: f64 = 360_000.0;

    pub fn points(self) -> f64 {
        f64::from(self.0) / Self::PER_POINT
    }

    pub fn centimeters(self) -> f64 {
        f64::from(self.0) * Self::EMU_PER_TWIP / Self::EMU_PER_CM
    }
}

/// Half-points, used for font sizes (`w:sz`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfPoints(pub u32);

impl HalfPoints {
    pub fn points(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

// ===== DOCUMENT MODEL =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distribute,
    ThaiDistribute,
    JustifyLow,
    JustifyMedium,
    JustifyHigh,
}

impl Alignment {
    /// Map a `w:jc` value onto an alignment. Unknown values yield `None`.
    pub fn from_jc(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "both" => Some(Alignment::Justify),
            "distribute" => Some(Alignment::Distribute),
            "thaiDistribute" => Some(Alignment::ThaiDistribute),
            "lowKashida" => Some(Alignment::JustifyLow),
            "mediumKashida" => Some(Alignment::JustifyMedium),
            "highKashida" => Some(Alignment::JustifyHigh),
            _ => None,
        }
    }

    /// Label used in reports
    pub fn label(self) -> &'static str {
        match self {
            Alignment::Left => "По лівому краю",
            Alignment::Center => "По центру",
            Alignment::Right => "По правому краю",
            Alignment::Justify => "По ширині",
            Alignment::Distribute => "Розподілене",
            Alignment::ThaiDistribute => "Тайське розподілене",
            Alignment::JustifyLow => "По ширині (кашида, мала)",
            Alignment::JustifyMedium => "По ширині (кашида, середня)",
            Alignment::JustifyHigh => "По ширині (кашида, велика)",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Paragraph-level formatting. `None` means the attribute is not set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphFormat {
    pub alignment: Option<Alignment>,
    /// Negative values are hanging indents
    pub first_line_indent: Option<Twips>,
    pub space_before: Option<Twips>,
    pub space_after: Option<Twips>,
}

impl ParagraphFormat {
    /// Fill attributes that are unset here from `fallback`.
    pub fn inherit_from(&mut self, fallback: &ParagraphFormat) {
        if self.alignment.is_none() {
            self.alignment = fallback.alignment;
        }
        if self.first_line_indent.is_none() {
            self.first_line_indent = fallback.first_line_indent;
        }
        if self.space_before.is_none() {
            self.space_before = fallback.space_before;
        }
        if self.space_after.is_none() {
            self.space_after = fallback.space_after;
        }
    }
}

/// Run-level character formatting. `None` means the attribute is not set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunFormat {
    pub font_name: Option<String>,
    pub font_size: Option<HalfPoints>,
}

impl RunFormat {
    pub fn inherit_from(&mut self, fallback: &RunFormat) {
        if self.font_name.is_none() {
            self.font_name = fallback.font_name.clone();
        }
        if self.font_size.is_none() {
            self.font_size = fallback.font_size;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub format: RunFormat,
    /// Character style id (`w:rStyle`), if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_font(mut self, name: &str, size_pt: f64) -> Self {
        self.format.font_name = Some(name.to_string());
        self.format.font_size = Some(HalfPoints((size_pt * 2.0).round() as u32));
        self
    }

    pub fn font_name(&self) -> Option<&str> {
        self.format.font_name.as_deref()
    }

    /// Font size in points, if set
    pub fn font_size_pt(&self) -> Option<f64> {
        self.format.font_size.map(HalfPoints::points)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub style_name: String,
    pub format: ParagraphFormat,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Build a paragraph whose text is the concatenation of `runs`.
    pub fn from_runs(style_name: &str, runs: Vec<Run>) -> Self {
        let text = runs.iter().map(|run| run.text.as_str()).collect();
        Self {
            text,
            style_name: style_name.to_string(),
            format: ParagraphFormat::default(),
            runs,
        }
    }

    pub fn with_text(style_name: &str, text: &str) -> Self {
        Self::from_runs(style_name, vec![Run::new(text)])
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.format.alignment
    }

    /// First-line indent in centimeters rounded to two decimals, 0 when unset
    pub fn first_line_indent_cm(&self) -> f64 {
        self.format
            .first_line_indent
            .map(|indent| (indent.centimeters() * 100.0).round() / 100.0)
            .unwrap_or(0.0)
    }

    pub fn space_before_pt(&self) -> f64 {
        self.format.space_before.map(Twips::points).unwrap_or(0.0)
    }

    pub fn space_after_pt(&self) -> f64 {
        self.format.space_after.map(Twips::points).unwrap_or(0.0)
    }

    /// First five words followed by an ellipsis
    pub fn fragment(&self) -> String {
        let words: Vec<&str> = self.text.split_whitespace().take(5).collect();
        format!("{}...", words.join(" "))
    }
}

/// A loaded document: body paragraphs in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }
}

// ===== FINDINGS =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    Font,
    Alignment,
    Indent,
    Spacing,
    TableOfContents,
    ReferenceFormat,
    FigureAlignment,
}

impl FindingKind {
    pub fn label(self) -> &'static str {
        match self {
            FindingKind::Font => "Невідповідність шрифту",
            FindingKind::Alignment => "Невідповідність вирівнювання",
            FindingKind::Indent => "Невідповідність абзацного відступу",
            FindingKind::Spacing => "Невідповідність міжабзацних відступів",
            FindingKind::TableOfContents => "Невідповідність змісту",
            FindingKind::ReferenceFormat => "Невідповідність у списку джерел",
            FindingKind::FigureAlignment => "Невідповідність вирівнювання рисунка",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One detected rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub fragment: String,
    pub actual_value: String,
    pub expected_value: String,
    pub location: String,
}

impl Finding {
    pub fn new(
        kind: FindingKind,
        fragment: String,
        actual_value: String,
        expected_value: String,
        location: String,
    ) -> Self {
        Self {
            kind,
            fragment,
            actual_value,
            expected_value,
            location,
        }
    }
}

/// Location string for the 1-based paragraph `index`
pub fn paragraph_location(index: usize) -> String {
    format!("Абзац {index}")
}

/// Findings counted per kind, in the order kinds were first seen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindingSummary {
    pub counts: Vec<(FindingKind, usize)>,
    pub total: usize,
}

impl FindingSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts: Vec<(FindingKind, usize)> = Vec::new();
        for finding in findings {
            match counts.iter_mut().find(|(kind, _)| *kind == finding.kind) {
                Some(entry) => entry.1 += 1,
                None => counts.push((finding.kind, 1)),
            }
        }
        Self {
            counts,
            total: findings.len(),
        }
    }

    pub fn count(&self, kind: FindingKind) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

/// Format a point value the way the report shows numbers: no trailing `.0`.
pub fn format_points(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert_eq!(HalfPoints(28).points(), 14.0);
        assert_eq!(Twips(240).points(), 12.0);
        assert!((Twips(709).centimeters() - 1.2506).abs() < 0.001);
        assert!((Twips(567).centimeters() - 1.000125).abs() < 1e-9);
    }

    #[test]
    fn test_indent_rounds_to_two_decimals() {
        let mut paragraph = Paragraph::with_text("Normal", "text");
        paragraph.format.first_line_indent = Some(Twips(709));
        assert_eq!(paragraph.first_line_indent_cm(), 1.25);

        // 859 twips is 1.51518 cm
        paragraph.format.first_line_indent = Some(Twips(859));
        assert_eq!(paragraph.first_line_indent_cm(), 1.52);

        paragraph.format.first_line_indent = None;
        assert_eq!(paragraph.first_line_indent_cm(), 0.0);
    }

    #[test]
    fn test_fragment_takes_five_words() {
        let paragraph = Paragraph::with_text("Normal", "  one two\tthree four five six  ");
        assert_eq!(paragraph.fragment(), "one two three four five...");

        let empty = Paragraph::with_text("Normal", "");
        assert_eq!(empty.fragment(), "...");
    }

    #[test]
    fn test_jc_values() {
        assert_eq!(Alignment::from_jc("both"), Some(Alignment::Justify));
        assert_eq!(Alignment::from_jc("start"), Some(Alignment::Left));
        assert_eq!(Alignment::from_jc("end"), Some(Alignment::Right));
        assert_eq!(Alignment::from_jc("bogus"), None);
    }

    #[test]
    fn test_summary_keeps_first_seen_order() {
        let finding = |kind| Finding::new(kind, String::new(), String::new(), String::new(), String::new());
        let findings = vec![
            finding(FindingKind::Indent),
            finding(FindingKind::Font),
            finding(FindingKind::Indent),
        ];
        let summary = FindingSummary::from_findings(&findings);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.counts, vec![(FindingKind::Indent, 2), (FindingKind::Font, 1)]);
        assert_eq!(summary.count(FindingKind::Spacing), 0);
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(14.0), "14");
        assert_eq!(format_points(10.5), "10.5");
    }
}
