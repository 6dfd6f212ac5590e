//! Barcode generation

use svg_tree::{format_number, Element, Node};

use super::{replacement_group, BoxGeometry, FilterAction, FilterContext};
use crate::barcode::Symbology;
use crate::error::Result;

/// Names the field holding the value to encode
pub const BARCODE_MARKER: &str = "data-barcode";
/// Symbology name; code 128 when absent
pub const BARCODE_TYPE_MARKER: &str = "data-barcode-type";

fn symbology(element: &Element) -> Result<Symbology> {
    match element.attr(BARCODE_TYPE_MARKER) {
        Some(name) => name.parse(),
        None => Ok(Symbology::default()),
    }
}

pub(super) fn validate(element: &Element) -> Result<()> {
    symbology(element)?;
    BoxGeometry::from_element(element)?;
    Ok(())
}

pub(super) fn apply(element: &mut Element, ctx: &FilterContext<'_>) -> Result<FilterAction> {
    let field = element.attr(BARCODE_MARKER).unwrap_or_default().to_string();
    let value = ctx.field(&field)?;
    if value.is_empty() {
        return Ok(FilterAction::Remove);
    }

    let symbology = symbology(element)?;
    let pattern = symbology.encode(value)?;
    let area = BoxGeometry::from_element(element)?;
    let module = area.width / pattern.len() as f64;

    let mut group = replacement_group(element);
    if group.attr("fill").is_none() && group.attr("style").is_none() {
        group.set_attr("fill", "#000000");
    }

    let rect_name = element.sibling_name("rect");
    for (start, width) in pattern.bars() {
        let bar = Element::new(rect_name.as_str())
            .with_attr("x", format_number(area.x + start as f64 * module))
            .with_attr("y", format_number(area.y))
            .with_attr("width", format_number(width as f64 * module))
            .with_attr("height", format_number(area.height));
        group.append(bar);
    }

    tracing::trace!(field = %field, %symbology, modules = pattern.len(), "barcode generated");
    Ok(FilterAction::Replace(vec![Node::Element(group)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{row_from_pairs, MissingFieldPolicy};
    use crate::TemplateError;

    fn bar_box(symbology: &str) -> Element {
        Element::new("rect")
            .with_attr(BARCODE_MARKER, "code")
            .with_attr(BARCODE_TYPE_MARKER, symbology)
            .with_attr("id", "bc")
            .with_attr("x", "10")
            .with_attr("y", "5")
            .with_attr("width", "95")
            .with_attr("height", "20")
    }

    fn run(element: &mut Element, value: &str) -> Result<FilterAction> {
        let row = row_from_pairs([("code", value)]);
        let ctx = FilterContext::new(&row, MissingFieldPolicy::Fail);
        apply(element, &ctx)
    }

    #[test]
    fn test_ean13_bars_fill_the_box() {
        let action = run(&mut bar_box("ean13"), "4006381333931").unwrap();
        let FilterAction::Replace(nodes) = action else {
            panic!("expected replacement");
        };
        assert_eq!(nodes.len(), 1);

        let group = nodes[0].as_element().unwrap();
        assert!(group.is("g"));
        assert_eq!(group.attr("id"), Some("bc"));
        assert_eq!(group.attr("fill"), Some("#000000"));

        // 95 modules over 95 units: one unit per module, starting at x=10
        let first = group.child_elements().next().unwrap();
        assert_eq!(first.attr("x"), Some("10"));
        assert_eq!(first.attr("width"), Some("1"));
        assert_eq!(first.attr("height"), Some("20"));

        let last = group.child_elements().last().unwrap();
        assert_eq!(last.attr("x"), Some("104"));
        assert!(group.descendants().all(|e| !e.has_attr(BARCODE_MARKER)));
    }

    #[test]
    fn test_default_symbology_is_code128() {
        let mut e = bar_box("code128");
        e.remove_attr(BARCODE_TYPE_MARKER);
        assert!(matches!(run(&mut e, "A-1").unwrap(), FilterAction::Replace(_)));
    }

    #[test]
    fn test_invalid_value() {
        let err = run(&mut bar_box("ean13"), "4006381333932").unwrap_err();
        assert!(matches!(err, TemplateError::BarcodeEncoding { .. }));
    }

    #[test]
    fn test_empty_value_removes_node() {
        assert_eq!(run(&mut bar_box("code39"), "").unwrap(), FilterAction::Remove);
    }

    #[test]
    fn test_validate() {
        assert!(validate(&bar_box("upca")).is_ok());
        assert!(matches!(validate(&bar_box("qr")), Err(TemplateError::Load(_))));
    }
}
