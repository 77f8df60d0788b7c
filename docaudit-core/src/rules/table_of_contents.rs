use super::engine::CheckRule;
use super::progress::check_progress;
use crate::config::TableOfContentsRules;
use crate::types::*;

const FRAGMENT_CHARS: usize = 50;

/// Heading numbering. The i-th heading (1-based, counting headings only)
/// must contain the literal text "{i}.".
pub struct TableOfContentsRule<'a> {
    rules: &'a TableOfContentsRules,
}

impl<'a> TableOfContentsRule<'a> {
    pub fn new(rules: &'a TableOfContentsRules) -> Self {
        Self { rules }
    }
}

impl<'a> CheckRule for TableOfContentsRule<'a> {
    fn check(&self, document: &Document, findings: &mut Vec<Finding>, show_progress: bool) {
        let prefix = self.rules.heading_style_prefix.as_str();
        let headings: Vec<&str> = document
            .paragraphs
            .iter()
            .filter(|p| p.style_name.starts_with(prefix))
            .map(|p| p.text.as_str())
            .collect();

        let progress = check_progress(headings.len(), self.progress_label(), show_progress);

        for (index, heading) in headings.iter().enumerate() {
            let number = index + 1;
            if !heading.contains(&format!("{number}.")) {
                let fragment: String = heading.chars().take(FRAGMENT_CHARS).collect();
                findings.push(Finding::new(
                    FindingKind::TableOfContents,
                    format!("{fragment}..."),
                    "Відсутній або неправильний номер".to_string(),
                    format!("Розділ {number}"),
                    "Зміст".to_string(),
                ));
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
    }

    fn progress_label(&self) -> &str {
        "Перевірка змісту"
    }
}
