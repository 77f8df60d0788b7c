use super::engine::CheckRule;
use super::progress::check_progress;
use crate::config::FigureRules;
use crate::types::*;

/// Figure captions must be centered.
pub struct FiguresRule<'a> {
    rules: &'a FigureRules,
}

impl<'a> FiguresRule<'a> {
    pub fn new(rules: &'a FigureRules) -> Self {
        Self { rules }
    }
}

impl<'a> CheckRule for FiguresRule<'a> {
    fn check(&self, document: &Document, findings: &mut Vec<Finding>, show_progress: bool) {
        let progress = check_progress(document.paragraphs.len(), self.progress_label(), show_progress);

        for (index, paragraph) in document.paragraphs.iter().enumerate() {
            if paragraph.text.contains(&self.rules.caption_marker)
                && paragraph.alignment() != Some(Alignment::Center)
            {
                findings.push(Finding::new(
                    FindingKind::FigureAlignment,
                    paragraph.fragment(),
                    "Не по центру".to_string(),
                    Alignment::Center.label().to_string(),
                    paragraph_location(index + 1),
                ));
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
    }

    fn progress_label(&self) -> &str {
        "Перевірка рисунків"
    }
}
