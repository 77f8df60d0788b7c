//! Readers for `w:pPr` / `w:rPr` children shared by the document and
//! styles parsers.

use crate::error::Result;
use crate::types::*;
use quick_xml::events::BytesStart;

/// Read an attribute value by its qualified name
pub(crate) fn attribute(element: &BytesStart, key: &str) -> Result<Option<String>> {
    let attr = element
        .try_get_attribute(key)
        .map_err(quick_xml::Error::from)?;
    match attr {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Parse a twips measure. Fractional values are rounded; garbage is ignored.
fn parse_twips(value: &str) -> Option<Twips> {
    value
        .trim()
        .parse::<i32>()
        .ok()
        .or_else(|| value.trim().parse::<f64>().ok().map(|v| v.round() as i32))
        .map(Twips)
}

/// Apply one paragraph-property element. Returns false for elements this
/// reader does not handle.
pub(crate) fn apply_paragraph_property(
    element: &BytesStart,
    format: &mut ParagraphFormat,
) -> Result<bool> {
    match element.name().as_ref() {
        b"w:jc" => {
            if let Some(value) = attribute(element, "w:val")? {
                format.alignment = Alignment::from_jc(&value);
            }
        }
        b"w:ind" => {
            // A hanging indent wins over firstLine when both are present
            if let Some(hanging) = attribute(element, "w:hanging")?.as_deref().and_then(parse_twips) {
                format.first_line_indent = Some(Twips(-hanging.0));
            } else if let Some(first_line) =
                attribute(element, "w:firstLine")?.as_deref().and_then(parse_twips)
            {
                format.first_line_indent = Some(first_line);
            }
        }
        b"w:spacing" => {
            if let Some(before) = attribute(element, "w:before")?.as_deref().and_then(parse_twips) {
                format.space_before = Some(before);
            }
            if let Some(after) = attribute(element, "w:after")?.as_deref().and_then(parse_twips) {
                format.space_after = Some(after);
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}

/// Apply one run-property element. Returns false for elements this reader
/// does not handle.
pub(crate) fn apply_run_property(element: &BytesStart, format: &mut RunFormat) -> Result<bool> {
    match element.name().as_ref() {
        b"w:rFonts" => {
            if let Some(ascii) = attribute(element, "w:ascii")? {
                format.font_name = Some(ascii);
            }
        }
        b"w:sz" => {
            if let Some(size) = attribute(element, "w:val")?
                .as_deref()
                .and_then(|v| v.trim().parse::<u32>().ok())
            {
                format.font_size = Some(HalfPoints(size));
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn first_element(xml: &str) -> BytesStart<'static> {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event().unwrap() {
                Event::Empty(e) | Event::Start(e) => return e.into_owned(),
                Event::Eof => panic!("no element in {xml}"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_hanging_indent_is_negative() {
        let mut format = ParagraphFormat::default();
        let e = first_element(r#"<w:ind w:left="567" w:hanging="567"/>"#);
        assert!(apply_paragraph_property(&e, &mut format).unwrap());
        assert_eq!(format.first_line_indent, Some(Twips(-567)));
    }

    #[test]
    fn test_spacing_keeps_unset_side_empty() {
        let mut format = ParagraphFormat::default();
        let e = first_element(r#"<w:spacing w:after="160" w:line="259"/>"#);
        apply_paragraph_property(&e, &mut format).unwrap();
        assert_eq!(format.space_before, None);
        assert_eq!(format.space_after, Some(Twips(160)));
    }

    #[test]
    fn test_run_fonts_and_size() {
        let mut format = RunFormat::default();
        let fonts = first_element(r#"<w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman"/>"#);
        let size = first_element(r#"<w:sz w:val="28"/>"#);
        apply_run_property(&fonts, &mut format).unwrap();
        apply_run_property(&size, &mut format).unwrap();
        assert_eq!(format.font_name.as_deref(), Some("Times New Roman"));
        assert_eq!(format.font_size, Some(HalfPoints(28)));
    }

    #[test]
    fn test_unhandled_element() {
        let mut format = RunFormat::default();
        let bold = first_element(r#"<w:b/>"#);
        assert!(!apply_run_property(&bold, &mut format).unwrap());
    }
}
