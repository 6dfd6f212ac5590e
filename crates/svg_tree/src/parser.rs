//! SVG reader - build an element tree from markup

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, SvgError};
use crate::node::{Element, Node};

/// Parse a complete document and return its root element.
///
/// The XML declaration, doctype and processing instructions are dropped.
/// Text is kept as written. Whitespace-only runs between elements are
/// dropped unless they sit inside text content or under
/// `xml:space="preserve"`.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                stack.push(element_from_start(e)?);
            }
            Event::Empty(ref e) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, Node::Element(element))?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| SvgError::Malformed("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, Node::Element(element))?;
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                let keep = !text.is_empty()
                    && (!text.trim().is_empty() || preserves_whitespace(&stack));
                if let Some(parent) = stack.last_mut() {
                    if keep {
                        parent.append(Node::Text(text.into_owned()));
                    }
                }
            }
            Event::CData(ref e) => {
                if let Some(parent) = stack.last_mut() {
                    parent.append(Node::CData(String::from_utf8_lossy(e).into_owned()));
                }
            }
            Event::Comment(ref e) => {
                if let Some(parent) = stack.last_mut() {
                    parent.append(Node::Comment(String::from_utf8_lossy(e).into_owned()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(SvgError::Malformed(format!(
            "unclosed element <{}>",
            open.name()
        )));
    }

    root.ok_or_else(|| SvgError::Malformed("document has no root element".to_string()))
}

/// Read and parse a document from disk
pub fn parse_file(path: impl AsRef<Path>) -> Result<Element> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content)
}

/// Elements whose whitespace is rendered
const TEXT_CONTENT: [&str; 3] = ["text", "tspan", "textPath"];

/// True if whitespace-only text under the innermost open element is significant
fn preserves_whitespace(stack: &[Element]) -> bool {
    let Some(parent) = stack.last() else {
        return false;
    };
    if TEXT_CONTENT.iter().any(|name| parent.is(name)) {
        return true;
    }
    stack
        .iter()
        .rev()
        .find_map(|e| e.attr("xml:space"))
        .is_some_and(|space| space == "preserve")
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.set_attr(key, value);
    }
    Ok(element)
}

/// Attach a finished node to the open parent, or make it the root
fn attach(stack: &mut [Element], root: &mut Option<Element>, node: Node) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.append(node);
        return Ok(());
    }

    match node {
        Node::Element(element) => {
            if root.is_some() {
                return Err(SvgError::Malformed(
                    "document has more than one root element".to_string(),
                ));
            }
            *root = Some(element);
            Ok(())
        }
        _ => Ok(()),
    }
}
