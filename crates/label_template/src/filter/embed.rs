//! External SVG embedding

use std::path::PathBuf;

use svg_tree::{format_number, parse_file, parse_length, Element, Node, ViewBox};

use super::{replacement_group, BoxGeometry, FilterAction, FilterContext};
use crate::error::{Result, TemplateError};

/// Names the field holding the path of the document to embed
pub const EMBED_MARKER: &str = "data-svg";

/// Root attributes that describe the embedded document's viewport or
/// identity and are not carried onto its content
const VIEWPORT_ATTRIBUTES: [&str; 9] = [
    "id",
    "x",
    "y",
    "width",
    "height",
    "viewBox",
    "preserveAspectRatio",
    "version",
    "baseProfile",
];

fn is_namespace_declaration(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}

/// User-space extent of an embedded document
fn source_view_box(root: &Element) -> Option<ViewBox> {
    if let Some(vb) = root
        .attr_local("viewBox")
        .and_then(|v| v.parse::<ViewBox>().ok())
    {
        return Some(vb);
    }
    let width = parse_length(root.attr_local("width")?).ok()?;
    let height = parse_length(root.attr_local("height")?).ok()?;
    (width > 0.0 && height > 0.0).then(|| ViewBox::new(0.0, 0.0, width, height))
}

pub(super) fn apply(element: &mut Element, ctx: &FilterContext<'_>) -> Result<FilterAction> {
    let field = element.attr(EMBED_MARKER).unwrap_or_default().to_string();
    let value = ctx.field(&field)?;
    if value.is_empty() {
        return Ok(FilterAction::Remove);
    }

    let mut path = PathBuf::from(value);
    if path.is_relative() {
        if let Some(base) = ctx.base_dir {
            path = base.join(path);
        }
    }

    let mut source = parse_file(&path).map_err(|e| TemplateError::Embed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let area = BoxGeometry::from_element(element)?;
    let mut placement = format!(
        "translate({} {})",
        format_number(area.x),
        format_number(area.y)
    );

    // Fit the source into the box, centered, keeping its aspect ratio
    match source_view_box(&source) {
        Some(vb) if area.width > 0.0 && area.height > 0.0 => {
            let scale = (area.width / vb.width).min(area.height / vb.height);
            let dx = (area.width - vb.width * scale) / 2.0 - vb.min_x * scale;
            let dy = (area.height - vb.height * scale) / 2.0 - vb.min_y * scale;
            placement = format!(
                "translate({} {}) scale({})",
                format_number(area.x + dx),
                format_number(area.y + dy),
                format_number(scale)
            );
        }
        _ => {
            tracing::warn!(path = %path.display(), "embedded document has no usable size; placing unscaled");
        }
    }

    let mut group = replacement_group(element);
    let transform = match group.attr("transform") {
        Some(existing) => format!("{} {}", existing, placement),
        None => placement,
    };
    group.set_attr("transform", transform);

    // Prefixes used inside the embedded content must stay declared
    for attr in source.attributes() {
        if is_namespace_declaration(&attr.name) && !group.has_attr(&attr.name) {
            group.set_attr(attr.name.as_str(), attr.value.as_str());
        }
    }

    // The source root's presentation attributes move to an inner group
    let mut content = Element::new(group.sibling_name("g"));
    for attr in source.attributes() {
        let local = svg_tree::local_name(&attr.name);
        if !is_namespace_declaration(&attr.name) && !VIEWPORT_ATTRIBUTES.contains(&local) {
            content.set_attr(attr.name.as_str(), attr.value.as_str());
        }
    }
    let children = source.take_children();
    if content.attributes().is_empty() {
        for child in children {
            group.append(child);
        }
    } else {
        for child in children {
            content.append(child);
        }
        group.append(content);
    }

    Ok(FilterAction::Replace(vec![Node::Element(group)]))
}
