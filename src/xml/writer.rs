use std::io::Cursor;

use encoding_rs::Encoding;
use log::warn;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::core::{FapiaoError, Result};

use super::tree::XmlElement;

fn xml_io(e: std::io::Error) -> FapiaoError {
    FapiaoError::Xml(format!("XML write error: {e}"))
}

/// Serialize `root` as compact UTF-8 markup without a declaration.
pub fn to_xml_string(root: &XmlElement) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_element(&mut writer, root)?;

    let buf = writer.into_inner().into_inner();
    String::from_utf8(buf).map_err(|e| FapiaoError::Xml(format!("XML UTF-8 error: {e}")))
}

/// Serialize `root` to bytes in the encoding named by `encoding_label`.
///
/// The declaration carries the label verbatim and is left out for UTF-8
/// and US-ASCII output. Characters the encoding cannot represent are
/// written as decimal character references.
pub fn to_xml_bytes(root: &XmlElement, encoding_label: &str) -> Result<Vec<u8>> {
    let lowered = encoding_label.trim().to_ascii_lowercase();
    // WHATWG maps the ASCII labels to windows-1252.
    if matches!(lowered.as_str(), "us-ascii" | "ascii") {
        return Ok(ascii_with_references(&to_xml_string(root)?));
    }

    let encoding = Encoding::for_label(lowered.as_bytes())
        .ok_or_else(|| FapiaoError::Encoding(format!("unknown encoding {encoding_label:?}")))?;

    let mut text = String::new();
    if !matches!(lowered.as_str(), "utf-8" | "utf8") {
        text.push_str(&format!("<?xml version='1.0' encoding='{encoding_label}'?>\n"));
    }
    text.push_str(&to_xml_string(root)?);

    let (bytes, used, unmappable) = encoding.encode(&text);
    if used != encoding {
        return Err(FapiaoError::Encoding(format!(
            "{} cannot be used as an output encoding",
            encoding.name()
        )));
    }
    if unmappable {
        warn!(
            "Some characters are not representable in {} and were written as character references.",
            encoding.name()
        );
    }
    Ok(bytes.into_owned())
}

fn ascii_with_references(text: &str) -> Vec<u8> {
    let mut out = String::with_capacity(text.len());
    let mut replaced = false;
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&format!("&#{};", c as u32));
            replaced = true;
        }
    }
    if replaced {
        warn!("Some characters are not representable in US-ASCII and were written as character references.");
    }
    out.into_bytes()
}

fn write_element(writer: &mut Writer<Cursor<Vec<u8>>>, element: &XmlElement) -> Result<()> {
    let text = element.text.as_deref().unwrap_or_default();

    if text.is_empty() && element.children.is_empty() {
        // `<Tag />`, the short form the import tool was written against.
        let content = format!("{} ", element.tag);
        writer
            .write_event(Event::Empty(BytesStart::from_content(content, element.tag.len())))
            .map_err(xml_io)?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(BytesStart::new(element.tag.as_str())))
        .map_err(xml_io)?;
    if !text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
            .map_err(xml_io)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.tag.as_str())))
        .map_err(xml_io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlElement {
        let mut root = XmlElement::new("Kp");
        root.push(XmlElement::with_text("Bz", Some("A&B <c>".into())));
        root.push(XmlElement::with_text("Gfyhzh", None));
        root.push(XmlElement::with_text("Gfmc", Some("珠海市教育局".into())));
        root
    }

    #[test]
    fn compact_markup_with_short_empty_elements() {
        assert_eq!(
            to_xml_string(&sample()).unwrap(),
            "<Kp><Bz>A&amp;B &lt;c&gt;</Bz><Gfyhzh /><Gfmc>珠海市教育局</Gfmc></Kp>"
        );
    }

    #[test]
    fn quotes_are_not_escaped_in_text() {
        let el = XmlElement::with_text("Bz", Some("\"x\" 'y'".into()));
        assert_eq!(to_xml_string(&el).unwrap(), "<Bz>\"x\" 'y'</Bz>");
    }

    #[test]
    fn gbk_output() {
        let bytes = to_xml_bytes(&sample(), "gbk").unwrap();
        let (decoded, _, errors) = encoding_rs::GBK.decode(&bytes);
        assert!(!errors);
        assert!(decoded.starts_with("<?xml version='1.0' encoding='gbk'?>\n<Kp>"));
        assert!(decoded.contains("珠海市教育局"));
        // Not UTF-8 on the wire.
        assert!(String::from_utf8(bytes).is_err());
    }

    #[test]
    fn unmappable_characters_become_references() {
        let el = XmlElement::with_text("Bz", Some("😀".into()));
        let bytes = to_xml_bytes(&el, "gbk").unwrap();
        assert!(bytes.ends_with(b"<Bz>&#128512;</Bz>"));
    }

    #[test]
    fn utf8_has_no_declaration() {
        let bytes = to_xml_bytes(&sample(), "utf-8").unwrap();
        assert!(bytes.starts_with(b"<Kp>"));
    }

    #[test]
    fn ascii_output_uses_references() {
        let el = XmlElement::with_text("Bz", Some("café 钢".into()));
        for label in ["us-ascii", "ASCII"] {
            let bytes = to_xml_bytes(&el, label).unwrap();
            assert_eq!(bytes, b"<Bz>caf&#233; &#38050;</Bz>");
        }
    }

    #[test]
    fn unknown_encoding() {
        assert!(matches!(
            to_xml_bytes(&sample(), "klingon"),
            Err(FapiaoError::Encoding(_))
        ));
    }
}
