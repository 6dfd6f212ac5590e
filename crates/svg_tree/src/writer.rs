//! SVG writer - serialize an element tree back to markup

use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::node::{Element, Node};

/// Serialize a document, with XML declaration, to a string
pub fn write_document(root: &Element) -> Result<String> {
    let mut buffer = Vec::new();
    write_to(&mut buffer, root)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Serialize a document to any writer
pub fn write_to<W: Write>(inner: W, root: &Element) -> Result<()> {
    let mut writer = Writer::new(inner);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;
    Ok(())
}

/// Serialize a document into a file, replacing any existing content
pub fn write_file(path: impl AsRef<Path>, root: &Element) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut out = std::io::BufWriter::new(file);
    write_to(&mut out, root)?;
    out.flush()?;
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name());
    for attr in element.attributes() {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }

    if element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in element.children() {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
            Node::CData(t) => writer.write_event(Event::CData(BytesCData::new(t.as_str())))?,
            Node::Comment(t) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(t.as_str())))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}
