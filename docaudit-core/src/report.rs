//! Plain-text discrepancy report

use crate::types::Finding;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const REPORT_TITLE: &str = "Звіт про аналіз документу";
pub const SEPARATOR_WIDTH: usize = 50;

/// Write the report for `findings` to any writer.
///
/// Layout: title line, a line of `=`, a blank line, then per finding five
/// labelled lines followed by a line of `-`.
pub fn write_report<W: Write>(findings: &[Finding], writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{REPORT_TITLE}")?;
    writeln!(writer, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    writeln!(writer)?;

    for finding in findings {
        writeln!(writer, "Тип помилки: {}", finding.kind.label())?;
        writeln!(writer, "Фрагмент: {}", finding.fragment)?;
        writeln!(writer, "Фактичне значення: {}", finding.actual_value)?;
        writeln!(writer, "Очікуване значення: {}", finding.expected_value)?;
        writeln!(writer, "Розташування: {}", finding.location)?;
        writeln!(writer, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    }

    Ok(())
}

/// Create or overwrite `output_file` with the report
pub fn write_report_file(findings: &[Finding], output_file: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(output_file)?);
    write_report(findings, &mut writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FindingKind;

    #[test]
    fn test_empty_report_is_header_only() {
        let mut out = Vec::new();
        write_report(&[], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{REPORT_TITLE}\n{}\n\n", "=".repeat(50)));
    }

    #[test]
    fn test_finding_block_layout() {
        let finding = Finding::new(
            FindingKind::FigureAlignment,
            "Рисунок 1 - Схема...".to_string(),
            "Не по центру".to_string(),
            "По центру".to_string(),
            "Абзац 7".to_string(),
        );
        let mut out = Vec::new();
        write_report(&[finding], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3 + 6);
        assert_eq!(lines[3], "Тип помилки: Невідповідність вирівнювання рисунка");
        assert_eq!(lines[4], "Фрагмент: Рисунок 1 - Схема...");
        assert_eq!(lines[5], "Фактичне значення: Не по центру");
        assert_eq!(lines[6], "Очікуване значення: По центру");
        assert_eq!(lines[7], "Розташування: Абзац 7");
        assert_eq!(lines[8], "-".repeat(50));
    }
}
