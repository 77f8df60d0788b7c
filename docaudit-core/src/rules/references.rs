use super::engine::CheckRule;
use super::progress::check_progress;
use crate::config::ReferenceRules;
use crate::types::*;

/// Reference list format. From the first paragraph containing the section
/// marker to the end of the document, every paragraph whose trimmed text is
/// not purely numeric is flagged. The marker paragraph itself is included.
pub struct ReferencesRule<'a> {
    rules: &'a ReferenceRules,
}

impl<'a> ReferencesRule<'a> {
    pub fn new(rules: &'a ReferenceRules) -> Self {
        Self { rules }
    }
}

/// Code point of the zero in each decimal digit block (Unicode `Nd`, BMP)
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10,
];

/// Digits outside the decimal blocks: superscripts, subscripts and circled forms
const OTHER_DIGITS: &[(u32, u32)] = &[
    (0x00B2, 0x00B3),
    (0x00B9, 0x00B9),
    (0x2070, 0x2070),
    (0x2074, 0x2079),
    (0x2080, 0x2089),
    (0x2460, 0x2468),
    (0x2474, 0x247C),
    (0x2488, 0x2490),
    (0x24EA, 0x24EA),
    (0x2776, 0x277E),
    (0x2780, 0x2788),
    (0x278A, 0x2792),
];

/// A digit character. Numerals such as `Ⅳ` and fractions such as `½` are
/// numeric but not digits.
fn is_digit(c: char) -> bool {
    let code = u32::from(c);
    DECIMAL_ZEROS.iter().any(|&zero| (zero..zero + 10).contains(&code))
        || OTHER_DIGITS.iter().any(|&(start, end)| (start..=end).contains(&code))
}

/// Non-empty and made only of digits
fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_digit)
}

impl<'a> CheckRule for ReferencesRule<'a> {
    fn check(&self, document: &Document, findings: &mut Vec<Finding>, show_progress: bool) {
        let progress = check_progress(document.paragraphs.len(), self.progress_label(), show_progress);
        let mut in_references = false;

        for (index, paragraph) in document.paragraphs.iter().enumerate() {
            if paragraph.text.contains(&self.rules.section_marker) {
                in_references = true;
            }
            if in_references && !is_numeric(paragraph.text.trim()) {
                findings.push(Finding::new(
                    FindingKind::ReferenceFormat,
                    paragraph.fragment(),
                    "Неправильний формат посилання".to_string(),
                    "Послідовна нумерація".to_string(),
                    paragraph_location(index + 1),
                ));
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
    }

    fn progress_label(&self) -> &str {
        "Перевірка списку джерел"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("12"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("1."));
        assert!(!is_numeric("1 2"));
    }

    #[test]
    fn test_only_digits_count() {
        assert!(is_numeric("٣٤"));
        assert!(is_numeric("１２"));
        assert!(is_numeric("²"));
        assert!(!is_numeric("Ⅳ"));
        assert!(!is_numeric("½"));
        assert!(!is_numeric("三"));
    }

    #[test]
    fn test_roman_numerals_and_fractions_are_flagged() {
        let document = Document::new(vec![
            Paragraph::with_text("Heading 1", "Список джерел"),
            Paragraph::with_text("Normal", "Ⅳ"),
            Paragraph::with_text("Normal", "½"),
            Paragraph::with_text("Normal", "12"),
        ]);
        let rules = ReferenceRules::default();
        let mut findings = Vec::new();
        ReferencesRule::new(&rules).check(&document, &mut findings, false);

        let locations: Vec<&str> = findings.iter().map(|f| f.location.as_str()).collect();
        assert_eq!(locations, vec!["Абзац 1", "Абзац 2", "Абзац 3"]);
    }
}
