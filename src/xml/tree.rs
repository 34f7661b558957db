use crate::core::InvoiceRecord;

use super::INTERFACE_VERSION;

/// An element of the assembled document. `text: None` is an empty element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub tag: String,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(tag: impl Into<String>, text: Option<String>) -> Self {
        Self {
            text,
            ..Self::new(tag)
        }
    }

    /// Append a child and return it for further nesting.
    pub fn push(&mut self, child: XmlElement) -> &mut XmlElement {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.tag == tag)
    }

    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Build the `Kp` document for `invoices`.
///
/// ```text
/// Kp
///   Version
///   Fpxx
///     Zsl            invoice count
///     Fpsj
///       Fp*          Djh = 1-based position, then header fields
///         Spxx
///           Sph*     line fields, Je last
/// ```
///
/// Absent values still produce their element, just without text.
pub fn assemble(invoices: &[InvoiceRecord]) -> XmlElement {
    let mut kp = XmlElement::new("Kp");
    kp.push(XmlElement::with_text("Version", Some(INTERFACE_VERSION.into())));

    let fpxx = kp.push(XmlElement::new("Fpxx"));
    fpxx.push(XmlElement::with_text("Zsl", Some(invoices.len().to_string())));

    let fpsj = fpxx.push(XmlElement::new("Fpsj"));
    for (index, invoice) in invoices.iter().enumerate() {
        let fp = fpsj.push(XmlElement::new("Fp"));
        fp.push(XmlElement::with_text("Djh", Some((index + 1).to_string())));
        for (tag, text) in invoice.header.xml_fields() {
            fp.push(XmlElement::with_text(tag, text));
        }

        let spxx = fp.push(XmlElement::new("Spxx"));
        for line in &invoice.lines {
            let sph = spxx.push(XmlElement::new("Sph"));
            for (tag, text) in line.xml_fields() {
                sph.push(XmlElement::with_text(tag, text));
            }
        }
    }

    kp
}
