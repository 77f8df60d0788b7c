//! `word/document.xml` parser
//!
//! Streams the main document part and builds the body paragraph list:
//! - only `w:p` elements that are direct children of `w:body` count, so
//!   table cells and text boxes are skipped
//! - runs are the direct `w:r` children of a paragraph
//! - hyperlink runs contribute to the paragraph text but are not runs
//! - formatting is read as set directly on the paragraph or run; style
//!   inheritance is applied afterwards when requested

use super::properties::{apply_paragraph_property, apply_run_property, attribute};
use super::styles::StyleSheet;
use crate::error::Result;
use crate::types::*;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

/// Paragraph being assembled while its element is open
struct OpenParagraph {
    paragraph: Paragraph,
    style_id: Option<String>,
    /// Stack depth of the `w:p` element itself
    depth: usize,
}

/// What an element inside an open paragraph contributes
enum Target {
    NewRun,
    ParagraphProperty,
    RunProperty,
    RunContent { direct_run: bool },
}

struct DocumentXmlParser<'a> {
    styles: &'a StyleSheet,
    inherit_styles: bool,
    stack: Vec<Vec<u8>>,
    open: Option<OpenParagraph>,
    paragraphs: Vec<Paragraph>,
}

/// Parse `word/document.xml` into a Document
pub fn parse_document_xml(xml: &str, styles: &StyleSheet, inherit_styles: bool) -> Result<Document> {
    let parser = DocumentXmlParser {
        styles,
        inherit_styles,
        stack: Vec::new(),
        open: None,
        paragraphs: Vec::new(),
    };
    parser.run(xml)
}

impl<'a> DocumentXmlParser<'a> {
    fn run(mut self, xml: &str) -> Result<Document> {
        let mut reader = Reader::from_str(xml);

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    self.on_element(&e, false)?;
                    self.stack.push(e.name().as_ref().to_vec());
                }
                Event::Empty(e) => self.on_element(&e, true)?,
                Event::Text(t) => self.on_text(&t)?,
                Event::End(_) => {
                    self.stack.pop();
                    let closes_paragraph = self
                        .open
                        .as_ref()
                        .is_some_and(|open| open.depth == self.stack.len());
                    if closes_paragraph {
                        self.close_paragraph();
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Document::new(self.paragraphs))
    }

    /// Element names between the open paragraph and the current position
    fn path_in_paragraph(&self) -> Option<&[Vec<u8>]> {
        self.open
            .as_ref()
            .map(|open| &self.stack[(open.depth + 1).min(self.stack.len())..])
    }

    fn on_element(&mut self, e: &BytesStart, is_empty: bool) -> Result<()> {
        let name = e.name();
        let name = name.as_ref();

        if name == b"w:p" && self.stack.last().map(Vec::as_slice) == Some(b"w:body".as_slice()) {
            self.open = Some(OpenParagraph {
                paragraph: Paragraph::default(),
                style_id: None,
                depth: self.stack.len(),
            });
            if is_empty {
                self.close_paragraph();
            }
            return Ok(());
        }

        let Some(path) = self.path_in_paragraph() else {
            return Ok(());
        };
        let path: Vec<&[u8]> = path.iter().map(Vec::as_slice).collect();
        let target = match path.as_slice() {
            [] if name == b"w:r" => Target::NewRun,
            [b"w:pPr"] => Target::ParagraphProperty,
            [b"w:r", b"w:rPr"] => Target::RunProperty,
            [b"w:r"] => Target::RunContent { direct_run: true },
            [b"w:hyperlink", b"w:r"] => Target::RunContent { direct_run: false },
            _ => return Ok(()),
        };

        match target {
            Target::NewRun => {
                if let Some(open) = self.open.as_mut() {
                    open.paragraph.runs.push(Run::default());
                }
            }
            Target::ParagraphProperty => self.on_paragraph_property(e)?,
            Target::RunProperty => self.on_run_property(e)?,
            Target::RunContent { direct_run } => self.on_run_content(e, direct_run)?,
        }
        Ok(())
    }

    fn on_paragraph_property(&mut self, e: &BytesStart) -> Result<()> {
        let Some(open) = self.open.as_mut() else {
            return Ok(());
        };
        if e.name().as_ref() == b"w:pStyle" {
            open.style_id = attribute(e, "w:val")?;
            return Ok(());
        }
        apply_paragraph_property(e, &mut open.paragraph.format)?;
        Ok(())
    }

    fn on_run_property(&mut self, e: &BytesStart) -> Result<()> {
        let Some(run) = self.open.as_mut().and_then(|open| open.paragraph.runs.last_mut()) else {
            return Ok(());
        };
        if e.name().as_ref() == b"w:rStyle" {
            run.style_id = attribute(e, "w:val")?;
            return Ok(());
        }
        apply_run_property(e, &mut run.format)?;
        Ok(())
    }

    /// Tabs and line breaks inside a run become text. Page and column
    /// breaks add nothing.
    fn on_run_content(&mut self, e: &BytesStart, direct_run: bool) -> Result<()> {
        let text = match e.name().as_ref() {
            b"w:tab" => "\t",
            b"w:cr" => "\n",
            b"w:br" => match attribute(e, "w:type")?.as_deref() {
                None | Some("textWrapping") => "\n",
                _ => return Ok(()),
            },
            _ => return Ok(()),
        };
        self.push_text(text, direct_run);
        Ok(())
    }

    fn on_text(&mut self, t: &BytesText) -> Result<()> {
        let Some(path) = self.path_in_paragraph() else {
            return Ok(());
        };
        let path: Vec<&[u8]> = path.iter().map(Vec::as_slice).collect();
        let direct_run = match path.as_slice() {
            [b"w:r", b"w:t"] => true,
            [b"w:hyperlink", b"w:r", b"w:t"] => false,
            _ => return Ok(()),
        };
        let text = t.unescape()?;
        self.push_text(&text, direct_run);
        Ok(())
    }

    fn push_text(&mut self, text: &str, direct_run: bool) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        open.paragraph.text.push_str(text);
        if direct_run {
            if let Some(run) = open.paragraph.runs.last_mut() {
                run.text.push_str(text);
            }
        }
    }

    fn close_paragraph(&mut self) {
        let Some(OpenParagraph {
            mut paragraph,
            style_id,
            ..
        }) = self.open.take()
        else {
            return;
        };

        paragraph.style_name = self.styles.paragraph_style_name(style_id.as_deref());

        if self.inherit_styles {
            let inherited = self.styles.inherited_paragraph_format(style_id.as_deref());
            paragraph.format.inherit_from(&inherited);
            for run in &mut paragraph.runs {
                let inherited = self
                    .styles
                    .inherited_run_format(run.style_id.as_deref(), style_id.as_deref());
                run.format.inherit_from(&inherited);
            }
        }

        self.paragraphs.push(paragraph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        )
    }

    fn parse(body: &str) -> Document {
        parse_document_xml(&wrap(body), &StyleSheet::default(), false).unwrap()
    }

    #[test]
    fn test_runs_and_text() {
        let doc = parse(
            r#"<w:p><w:r><w:rPr><w:rFonts w:ascii="Arial"/><w:sz w:val="24"/></w:rPr><w:t xml:space="preserve">Hello </w:t></w:r><w:r><w:t>world</w:t></w:r></w:p>"#,
        );
        assert_eq!(doc.paragraphs.len(), 1);
        let paragraph = &doc.paragraphs[0];
        assert_eq!(paragraph.text, "Hello world");
        assert_eq!(paragraph.runs.len(), 2);
        assert_eq!(paragraph.runs[0].font_name(), Some("Arial"));
        assert_eq!(paragraph.runs[0].font_size_pt(), Some(12.0));
        assert_eq!(paragraph.runs[1].font_name(), None);
        assert_eq!(paragraph.runs[1].font_size_pt(), None);
        assert_eq!(paragraph.style_name, "Normal");
    }

    #[test]
    fn test_paragraph_properties() {
        let doc = parse(
            r#"<w:p><w:pPr><w:jc w:val="both"/><w:ind w:firstLine="709"/><w:spacing w:before="0" w:after="120"/><w:rPr><w:sz w:val="40"/></w:rPr></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#,
        );
        let paragraph = &doc.paragraphs[0];
        assert_eq!(paragraph.alignment(), Some(Alignment::Justify));
        assert_eq!(paragraph.first_line_indent_cm(), 1.25);
        assert_eq!(paragraph.space_before_pt(), 0.0);
        assert_eq!(paragraph.space_after_pt(), 6.0);
        // Paragraph mark properties do not leak into runs
        assert_eq!(paragraph.runs[0].font_size_pt(), None);
    }

    #[test]
    fn test_tables_and_text_boxes_are_skipped() {
        let doc = parse(
            r#"<w:p><w:r><w:t>before</w:t></w:r><w:r><w:drawing><w:txbxContent><w:p><w:r><w:t>boxed</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
<w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );
        let texts: Vec<&str> = doc.paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["before", "after"]);
        assert_eq!(doc.paragraphs[0].runs.len(), 2);
    }

    #[test]
    fn test_hyperlink_text_without_run() {
        let doc = parse(
            r#"<w:p><w:r><w:t>See </w:t></w:r><w:hyperlink><w:r><w:t>link</w:t></w:r></w:hyperlink></w:p>"#,
        );
        let paragraph = &doc.paragraphs[0];
        assert_eq!(paragraph.text, "See link");
        assert_eq!(paragraph.runs.len(), 1);
    }

    #[test]
    fn test_tabs_breaks_and_empty_paragraphs() {
        let doc = parse(r#"<w:p/><w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p><w:p></w:p>"#);
        assert_eq!(doc.paragraphs.len(), 3);
        assert_eq!(doc.paragraphs[0].text, "");
        assert_eq!(doc.paragraphs[1].text, "a\tb\nc");
        assert_eq!(doc.paragraphs[1].runs[0].text, "a\tb\nc");
        assert!(doc.paragraphs[2].runs.is_empty());
    }

    #[test]
    fn test_page_and_column_breaks_add_no_text() {
        let doc = parse(
            r#"<w:p><w:r><w:t>1</w:t><w:br w:type="page"/><w:t>2</w:t><w:br w:type="column"/><w:t>3</w:t><w:br w:type="textWrapping"/><w:t>4</w:t></w:r></w:p>"#,
        );
        assert_eq!(doc.paragraphs[0].text, "123\n4");
        assert_eq!(doc.paragraphs[0].runs[0].text, "123\n4");
    }

    #[test]
    fn test_escaped_text() {
        let doc = parse(r#"<w:p><w:r><w:t>A &amp; B &lt;1&gt;</w:t></w:r></w:p>"#);
        assert_eq!(doc.paragraphs[0].text, "A & B <1>");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let result = parse_document_xml(
            "<w:document><w:body><w:p></w:body></w:document>",
            &StyleSheet::default(),
            false,
        );
        assert!(result.is_err());
    }
}
