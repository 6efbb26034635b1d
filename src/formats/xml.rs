//! A small owned element tree built from `quick_xml` events.
//!
//! The markup formats are walked structurally (parent/child lookups by
//! name), so they are read into this tree once instead of being parsed as a
//! stream.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct XmlElement {
    pub(crate) name: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<XmlElement>,
    pub(crate) text: String,
}

impl XmlElement {
    pub(crate) fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First of `keys` present as an attribute.
    pub(crate) fn attr_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.attr(k))
    }

    pub(crate) fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub(crate) fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children
            .iter()
            .filter(move |c| c.name.eq_ignore_ascii_case(name))
    }

    /// Follow a `/`-separated child path, e.g. `"rate/timebase"`.
    pub(crate) fn path(&self, path: &str) -> Option<&XmlElement> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |el, seg| el.child(seg))
    }

    /// Trimmed text of the element at `path`, if non-empty.
    pub(crate) fn text_at(&self, path: &str) -> Option<&str> {
        let t = self.path(path)?.text.trim();
        (!t.is_empty()).then_some(t)
    }

    /// Attribute `key` or else the text of a child element with the same name.
    pub(crate) fn attr_or_text(&self, key: &str) -> Option<&str> {
        self.attr(key).or_else(|| self.text_at(key))
    }

    /// Descendants named `name`, without descending into matches.
    pub(crate) fn find_outermost<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlElement>) {
        for c in &self.children {
            if c.name.eq_ignore_ascii_case(name) {
                out.push(c);
            } else {
                c.find_outermost(name, out);
            }
        }
    }
}

/// Parse a whole document and return its root element.
pub(crate) fn parse_document(content: &str) -> Result<XmlElement, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("at byte {}: {e}", reader.buffer_position()))?;
        match event {
            Event::Start(ref e) => stack.push(element_from(e)),
            Event::Empty(ref e) => {
                let el = element_from(e);
                attach(&mut stack, &mut root, el)?;
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| "unbalanced closing tag".to_string())?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::Text(ref e) => {
                if let Some(top) = stack.last_mut() {
                    let text = e.unescape().unwrap_or_default();
                    top.text.push_str(&text);
                }
            }
            Event::CData(ref e) => {
                if let Some(top) = stack.last_mut() {
                    top.text
                        .push_str(&String::from_utf8_lossy(&e.clone().into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(format!("unclosed element <{}>", stack[stack.len() - 1].name));
    }
    root.ok_or_else(|| "document has no root element".to_string())
}

fn element_from(e: &BytesStart<'_>) -> XmlElement {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let attrs = e
        .attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr
                .unescape_value()
                .map(|v| v.to_string())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string());
            (key, value)
        })
        .collect();
    XmlElement {
        name,
        attrs,
        children: Vec::new(),
        text: String::new(),
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    el: XmlElement,
) -> Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None if root.is_none() => *root = Some(el),
        None => return Err(format!("second root element <{}>", el.name)),
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/formats/xml.rs"]
mod tests;
