use super::engine::CheckRule;
use super::progress::check_progress;
use crate::config::TextFormatRules;
use crate::types::*;

/// Body-text formatting: run fonts, paragraph alignment, first-line indent
/// and paragraph spacing.
pub struct TextFormatRule<'a> {
    rules: &'a TextFormatRules,
}

impl<'a> TextFormatRule<'a> {
    pub fn new(rules: &'a TextFormatRules) -> Self {
        Self { rules }
    }

    fn check_runs(&self, paragraph: &Paragraph, location: &str, findings: &mut Vec<Finding>) {
        let rules = self.rules;
        for run in &paragraph.runs {
            let size = run.font_size_pt();
            if run.font_name() == Some(rules.expected_font.as_str()) && size == Some(rules.expected_size) {
                continue;
            }

            let actual_value = match run.font_name() {
                Some(name) => format!("{}, {}pt", name, describe_size(size)),
                None => "Невідомий шрифт".to_string(),
            };
            findings.push(Finding::new(
                FindingKind::Font,
                paragraph.fragment(),
                actual_value,
                format!("{}, {}pt", rules.expected_font, format_points(rules.expected_size)),
                location.to_string(),
            ));
        }
    }

    fn check_alignment(&self, paragraph: &Paragraph, location: &str, findings: &mut Vec<Finding>) {
        let expected = self.rules.alignment;
        if paragraph.alignment() == Some(expected) {
            return;
        }
        let actual_value = paragraph
            .alignment()
            .map(|alignment| alignment.label().to_string())
            .unwrap_or_else(|| "Не задано".to_string());
        findings.push(Finding::new(
            FindingKind::Alignment,
            paragraph.fragment(),
            actual_value,
            expected.label().to_string(),
            location.to_string(),
        ));
    }

    fn check_indent(&self, paragraph: &Paragraph, location: &str, findings: &mut Vec<Finding>) {
        let rules = self.rules;
        let indent = paragraph.first_line_indent_cm();
        if rules.indent_min <= indent && indent <= rules.indent_max {
            return;
        }
        findings.push(Finding::new(
            FindingKind::Indent,
            paragraph.fragment(),
            format!("{} см", format_points(indent)),
            format!(
                "{}-{} см",
                format_points(rules.indent_min),
                format_points(rules.indent_max)
            ),
            location.to_string(),
        ));
    }

    fn check_spacing(&self, paragraph: &Paragraph, location: &str, findings: &mut Vec<Finding>) {
        let rules = self.rules;
        let before = paragraph.space_before_pt();
        let after = paragraph.space_after_pt();
        if before == rules.spacing_before && after == rules.spacing_after {
            return;
        }
        findings.push(Finding::new(
            FindingKind::Spacing,
            paragraph.fragment(),
            format!("До: {}, Після: {}", format_points(before), format_points(after)),
            format!(
                "До: {}, Після: {}",
                format_points(rules.spacing_before),
                format_points(rules.spacing_after)
            ),
            location.to_string(),
        ));
    }
}

fn describe_size(size: Option<f64>) -> String {
    size.map(format_points).unwrap_or_else(|| "не задано".to_string())
}

impl<'a> CheckRule for TextFormatRule<'a> {
    fn check(&self, document: &Document, findings: &mut Vec<Finding>, show_progress: bool) {
        let progress = check_progress(document.paragraphs.len(), self.progress_label(), show_progress);

        for (index, paragraph) in document.paragraphs.iter().enumerate() {
            let location = paragraph_location(index + 1);
            self.check_runs(paragraph, &location, findings);
            self.check_alignment(paragraph, &location, findings);
            self.check_indent(paragraph, &location, findings);
            self.check_spacing(paragraph, &location, findings);
            progress.inc(1);
        }

        progress.finish_and_clear();
    }

    fn progress_label(&self) -> &str {
        "Перевірка форматування тексту"
    }
}
