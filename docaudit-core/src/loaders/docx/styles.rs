//! `word/styles.xml` parsing and style resolution
//!
//! Resolves paragraph style ids to their display names and, when style
//! inheritance is requested, walks `w:basedOn` chains down to the document
//! defaults to fill formatting a paragraph or run does not set directly.

use super::properties::{apply_paragraph_property, apply_run_property, attribute};
use crate::error::Result;
use crate::types::*;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{HashMap, HashSet};

/// Name used when a document has no default paragraph style
const FALLBACK_STYLE_NAME: &str = "Normal";

/// Built-in style names Word stores in lower case, mapped to their UI names
const BUILTIN_STYLE_ALIASES: &[(&str, &str)] = &[
    ("caption", "Caption"),
    ("footer", "Footer"),
    ("header", "Header"),
    ("title", "Title"),
    ("subtitle", "Subtitle"),
    ("heading 1", "Heading 1"),
    ("heading 2", "Heading 2"),
    ("heading 3", "Heading 3"),
    ("heading 4", "Heading 4"),
    ("heading 5", "Heading 5"),
    ("heading 6", "Heading 6"),
    ("heading 7", "Heading 7"),
    ("heading 8", "Heading 8"),
    ("heading 9", "Heading 9"),
];

/// Map a stored style name onto the name shown to users
pub fn display_style_name(raw: &str) -> String {
    BUILTIN_STYLE_ALIASES
        .iter()
        .find(|(stored, _)| *stored == raw)
        .map(|(_, shown)| shown.to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleKind {
    fn from_type(value: Option<&str>) -> Self {
        match value {
            Some("character") => StyleKind::Character,
            Some("table") => StyleKind::Table,
            Some("numbering") => StyleKind::Numbering,
            // w:type defaults to paragraph when omitted
            _ => StyleKind::Paragraph,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StyleDefinition {
    pub style_id: String,
    pub name: Option<String>,
    pub kind: StyleKind,
    pub based_on: Option<String>,
    pub is_default: bool,
    pub paragraph_format: ParagraphFormat,
    pub run_format: RunFormat,
}

impl StyleDefinition {
    fn from_element(element: &BytesStart) -> Result<Self> {
        let kind = StyleKind::from_type(attribute(element, "w:type")?.as_deref());
        let style_id = attribute(element, "w:styleId")?.unwrap_or_default();
        let is_default = matches!(
            attribute(element, "w:default")?.as_deref(),
            Some("1") | Some("true") | Some("on")
        );
        Ok(Self {
            style_id,
            name: None,
            kind,
            based_on: None,
            is_default,
            paragraph_format: ParagraphFormat::default(),
            run_format: RunFormat::default(),
        })
    }

    /// Display name, falling back to the style id
    pub fn display_name(&self) -> String {
        display_style_name(self.name.as_deref().unwrap_or(&self.style_id))
    }
}

/// Parsed style definitions plus document-wide formatting defaults
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: HashMap<String, StyleDefinition>,
    default_paragraph_style: Option<String>,
    pub default_paragraph_format: ParagraphFormat,
    pub default_run_format: RunFormat,
}

impl StyleSheet {
    pub fn get(&self, style_id: &str) -> Option<&StyleDefinition> {
        self.styles.get(style_id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    fn insert(&mut self, style: StyleDefinition) {
        if style.kind == StyleKind::Paragraph
            && style.is_default
            && self.default_paragraph_style.is_none()
        {
            self.default_paragraph_style = Some(style.style_id.clone());
        }
        self.styles.insert(style.style_id.clone(), style);
    }

    /// The paragraph style that applies to a paragraph referencing
    /// `style_id`. Unknown or non-paragraph ids fall back to the default
    /// paragraph style.
    fn effective_paragraph_style(&self, style_id: Option<&str>) -> Option<&StyleDefinition> {
        style_id
            .and_then(|id| self.styles.get(id))
            .filter(|style| style.kind == StyleKind::Paragraph)
            .or_else(|| {
                self.default_paragraph_style
                    .as_deref()
                    .and_then(|id| self.styles.get(id))
            })
    }

    /// Display name of the paragraph style a paragraph uses
    pub fn paragraph_style_name(&self, style_id: Option<&str>) -> String {
        self.effective_paragraph_style(style_id)
            .map(StyleDefinition::display_name)
            .unwrap_or_else(|| FALLBACK_STYLE_NAME.to_string())
    }

    /// The style followed by its `basedOn` ancestors. Cycles end the walk.
    fn chain<'a>(&'a self, start: Option<&'a StyleDefinition>) -> Vec<&'a StyleDefinition> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = start;
        while let Some(style) = current {
            if !seen.insert(style.style_id.as_str()) {
                break;
            }
            chain.push(style);
            current = style.based_on.as_deref().and_then(|id| self.get(id));
        }
        chain
    }

    /// Paragraph formatting inherited from the paragraph style chain and
    /// document defaults
    pub fn inherited_paragraph_format(&self, style_id: Option<&str>) -> ParagraphFormat {
        let mut format = ParagraphFormat::default();
        for style in self.chain(self.effective_paragraph_style(style_id)) {
            format.inherit_from(&style.paragraph_format);
        }
        format.inherit_from(&self.default_paragraph_format);
        format
    }

    /// Run formatting inherited from the character style chain, then the
    /// paragraph style chain, then document defaults
    pub fn inherited_run_format(
        &self,
        run_style_id: Option<&str>,
        paragraph_style_id: Option<&str>,
    ) -> RunFormat {
        let mut format = RunFormat::default();
        let character_style = run_style_id
            .and_then(|id| self.styles.get(id))
            .filter(|style| style.kind == StyleKind::Character);
        for style in self.chain(character_style) {
            format.inherit_from(&style.run_format);
        }
        for style in self.chain(self.effective_paragraph_style(paragraph_style_id)) {
            format.inherit_from(&style.run_format);
        }
        format.inherit_from(&self.default_run_format);
        format
    }
}

/// Where in styles.xml the parser currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Other,
    DefaultRunProperties,
    DefaultParagraphProperties,
    Style,
    StyleRunProperties,
    StyleParagraphProperties,
}

/// Parse `word/styles.xml` into a StyleSheet
pub fn parse_styles_xml(xml: &str) -> Result<StyleSheet> {
    let mut reader = Reader::from_str(xml);
    let mut sheet = StyleSheet::default();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<StyleDefinition> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.name().as_ref() == b"w:style" {
                    current = Some(StyleDefinition::from_element(&e)?);
                } else {
                    apply_style_element(&e, scope_of(&stack), &mut sheet, current.as_mut())?;
                }
                stack.push(e.name().as_ref().to_vec());
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"w:style" {
                    sheet.insert(StyleDefinition::from_element(&e)?);
                } else {
                    apply_style_element(&e, scope_of(&stack), &mut sheet, current.as_mut())?;
                }
            }
            Event::End(e) => {
                stack.pop();
                if e.name().as_ref() == b"w:style" {
                    if let Some(style) = current.take() {
                        sheet.insert(style);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(sheet)
}

fn scope_of(stack: &[Vec<u8>]) -> Scope {
    let tail: Vec<&[u8]> = stack.iter().rev().take(3).rev().map(Vec::as_slice).collect();
    match tail.as_slice() {
        [.., b"w:rPrDefault", b"w:rPr"] => Scope::DefaultRunProperties,
        [.., b"w:pPrDefault", b"w:pPr"] => Scope::DefaultParagraphProperties,
        [.., b"w:style", b"w:rPr"] => Scope::StyleRunProperties,
        [.., b"w:style", b"w:pPr"] => Scope::StyleParagraphProperties,
        [.., b"w:style"] => Scope::Style,
        _ => Scope::Other,
    }
}

fn apply_style_element(
    element: &BytesStart,
    scope: Scope,
    sheet: &mut StyleSheet,
    current: Option<&mut StyleDefinition>,
) -> Result<()> {
    match (scope, current) {
        (Scope::DefaultRunProperties, _) => {
            apply_run_property(element, &mut sheet.default_run_format)?;
        }
        (Scope::DefaultParagraphProperties, _) => {
            apply_paragraph_property(element, &mut sheet.default_paragraph_format)?;
        }
        (Scope::Style, Some(style)) => match element.name().as_ref() {
            b"w:name" => style.name = attribute(element, "w:val")?,
            b"w:basedOn" => style.based_on = attribute(element, "w:val")?,
            _ => {}
        },
        (Scope::StyleRunProperties, Some(style)) => {
            apply_run_property(element, &mut style.run_format)?;
        }
        (Scope::StyleParagraphProperties, Some(style)) => {
            apply_paragraph_property(element, &mut style.paragraph_format)?;
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="160"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:rPr><w:rFonts w:ascii="Times New Roman"/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr><w:jc w:val="center"/></w:pPr>
    <w:rPr><w:sz w:val="32"/></w:rPr>
  </w:style>
  <w:style w:type="character" w:styleId="Emph">
    <w:name w:val="Emphasis Font"/>
    <w:rPr><w:rFonts w:ascii="Arial"/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="LoopA"><w:basedOn w:val="LoopB"/></w:style>
  <w:style w:type="paragraph" w:styleId="LoopB"><w:basedOn w:val="LoopA"/></w:style>
</w:styles>"#;

    #[test]
    fn test_builtin_names_are_shown_capitalized() {
        let sheet = parse_styles_xml(STYLES).unwrap();
        assert_eq!(sheet.paragraph_style_name(Some("1")), "Heading 1");
        assert_eq!(sheet.paragraph_style_name(None), "Normal");
        assert_eq!(sheet.paragraph_style_name(Some("Missing")), "Normal");
        // Character styles cannot be paragraph styles
        assert_eq!(sheet.paragraph_style_name(Some("Emph")), "Normal");
    }

    #[test]
    fn test_style_without_name_uses_id() {
        let sheet = parse_styles_xml(STYLES).unwrap();
        assert_eq!(sheet.paragraph_style_name(Some("LoopA")), "LoopA");
    }

    #[test]
    fn test_paragraph_format_inherits_through_chain() {
        let sheet = parse_styles_xml(STYLES).unwrap();
        let format = sheet.inherited_paragraph_format(Some("1"));
        assert_eq!(format.alignment, Some(Alignment::Center));
        assert_eq!(format.space_after, Some(Twips(160)));
        assert_eq!(format.space_before, None);
    }

    #[test]
    fn test_run_format_precedence() {
        let sheet = parse_styles_xml(STYLES).unwrap();

        let heading = sheet.inherited_run_format(None, Some("1"));
        assert_eq!(heading.font_name.as_deref(), Some("Times New Roman"));
        assert_eq!(heading.font_size, Some(HalfPoints(32)));

        let emphasized = sheet.inherited_run_format(Some("Emph"), Some("1"));
        assert_eq!(emphasized.font_name.as_deref(), Some("Arial"));
        assert_eq!(emphasized.font_size, Some(HalfPoints(32)));

        let body = sheet.inherited_run_format(None, None);
        assert_eq!(body.font_size, Some(HalfPoints(22)));
    }

    #[test]
    fn test_chain_walks_based_on_in_order() {
        let sheet = parse_styles_xml(STYLES).unwrap();
        let ids: Vec<&str> = sheet
            .chain(sheet.get("1"))
            .iter()
            .map(|style| style.style_id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "Normal"]);

        let looped: Vec<&str> = sheet
            .chain(sheet.get("LoopB"))
            .iter()
            .map(|style| style.style_id.as_str())
            .collect();
        assert_eq!(looped, vec!["LoopB", "LoopA"]);
        assert!(sheet.chain(None).is_empty());
    }

    #[test]
    fn test_based_on_cycle_terminates() {
        let sheet = parse_styles_xml(STYLES).unwrap();
        let format = sheet.inherited_paragraph_format(Some("LoopA"));
        assert_eq!(format.space_after, Some(Twips(160)));
    }

    #[test]
    fn test_display_style_name() {
        assert_eq!(display_style_name("heading 3"), "Heading 3");
        assert_eq!(display_style_name("List Paragraph"), "List Paragraph");
    }
}
