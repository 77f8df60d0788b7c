use crate::analyzer::DocumentAnalyzer;
use crate::config::rule_names;
use crate::types::*;
use anyhow::Result;
use regex::Regex;
use std::cell::RefCell;
use std::time::{Duration, Instant};

// Debug configuration for pipeline tracing
#[derive(Debug, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub filter_patterns: Vec<String>,
}

impl DebugConfig {
    pub fn new(enabled: bool, filter_patterns: Vec<String>) -> Self {
        Self {
            enabled,
            filter_patterns,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            filter_patterns: Vec::new(),
        }
    }

    /// Whether a fragment matches any filter pattern
    pub fn matches(&self, text: &str) -> bool {
        self.filter_patterns.iter().any(|pattern| {
            // Try regex first, fall back to simple string contains
            if let Ok(regex) = Regex::new(pattern) {
                regex.is_match(text)
            } else {
                text.contains(pattern.as_str())
            }
        })
    }
}

/// Debug utility function to trace the findings a rule produced
pub fn debug_rule_findings(rule_name: &str, findings: &[Finding], debug_config: &DebugConfig) {
    if !debug_config.enabled || debug_config.filter_patterns.is_empty() {
        return;
    }

    let matching: Vec<&Finding> = findings
        .iter()
        .filter(|finding| debug_config.matches(&finding.fragment))
        .collect();

    if !matching.is_empty() {
        println!("🔍 [{}] {} matching findings:", rule_name, matching.len());
        for finding in matching {
            println!(
                "  {}: \"{}\" ({} / expected {})",
                finding.location, finding.fragment, finding.actual_value, finding.expected_value
            );
        }
        println!();
    }
}

/// Sequential check pipeline: each rule reads the document and appends findings
pub trait CheckRule {
    fn check(&self, document: &Document, findings: &mut Vec<Finding>, show_progress: bool);
    /// Label shown next to the progress bar
    fn progress_label(&self) -> &str;
}

pub struct RuleEngine {
    debug_config: DebugConfig,
    pub rule_timings: RefCell<Vec<(String, Duration)>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            debug_config: DebugConfig::disabled(),
            rule_timings: RefCell::new(Vec::new()),
        }
    }

    pub fn set_debug_config(&mut self, debug_config: DebugConfig) {
        self.debug_config = debug_config;
    }

    /// Run the analyzer's configured pipeline in order.
    /// Returns the number of findings added.
    pub fn run(&self, analyzer: &mut DocumentAnalyzer) -> Result<usize> {
        let rules = analyzer.config().pipeline.rules.clone();
        let before = analyzer.findings().len();

        println!(
            "⚙️  Running {} configured checks over {} paragraphs",
            rules.iter().filter(|rule| rule.enabled).count(),
            analyzer.document().paragraphs.len()
        );

        // Clear previous timings
        self.rule_timings.borrow_mut().clear();

        for rule_config in &rules {
            if !rule_config.enabled {
                println!("   ⏭️  Skipping disabled rule: {}", rule_config.name);
                continue;
            }

            println!("🔧 Applying rule: {}", rule_config.name);
            let added = self.apply_rule_by_name(&rule_config.name, analyzer)?;
            println!("   ✅ {} findings from {}", added, rule_config.name);
        }

        Ok(analyzer.findings().len() - before)
    }

    fn apply_rule_by_name(&self, rule_name: &str, analyzer: &mut DocumentAnalyzer) -> Result<usize> {
        let rule_start = Instant::now();
        let before = analyzer.findings().len();

        match rule_name {
            rule_names::TEXT_FORMAT => {
                let rules = analyzer.config().text_format.clone();
                analyzer.check_text_format(&rules);
            }
            rule_names::TABLE_OF_CONTENTS => analyzer.check_table_of_contents(),
            rule_names::REFERENCES => analyzer.check_references(),
            rule_names::FIGURES => analyzer.check_figures(),
            _ => {
                println!("⚠️  Unknown rule: {rule_name}. Skipping...");
                return Ok(0);
            }
        }

        let added = &analyzer.findings()[before..];
        debug_rule_findings(rule_name, added, &self.debug_config);

        self.rule_timings
            .borrow_mut()
            .push((rule_name.to_string(), rule_start.elapsed()));
        Ok(added.len())
    }

    pub fn print_timings(&self) {
        let timings = self.rule_timings.borrow();
        if timings.is_empty() {
            return;
        }

        println!("\n📊 Rule Timings:");
        let total: Duration = timings.iter().map(|(_, d)| *d).sum();
        for (rule, duration) in timings.iter() {
            println!("   {:.<35} {:.2}ms", rule, duration.as_secs_f64() * 1000.0);
        }
        println!("   {:.<35} {:.2}ms", "Total", total.as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_matches_regex_and_plain_text() {
        let config = DebugConfig::new(true, vec![r"^Рисунок \d".to_string(), "(unclosed".to_string()]);
        assert!(config.matches("Рисунок 1 - Схема..."));
        assert!(config.matches("text with (unclosed paren"));
        assert!(!config.matches("Вступ..."));
    }
}
