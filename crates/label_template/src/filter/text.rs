//! Text substitution

use svg_tree::Element;

use super::{FilterAction, FilterContext};
use crate::error::Result;

/// Names the field whose value becomes the element's text
pub const TEXT_MARKER: &str = "data-text";

pub(super) fn apply(element: &mut Element, ctx: &FilterContext<'_>) -> Result<FilterAction> {
    let field = element.attr(TEXT_MARKER).unwrap_or_default().to_string();
    let value = ctx.field(&field)?;
    element.set_text(value);
    element.remove_attr(TEXT_MARKER);
    Ok(FilterAction::Keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::row::{row_from_pairs, MissingFieldPolicy};
    use crate::TemplateError;
    use svg_tree::{parse_document, Node};

    #[test]
    fn test_replaces_placeholder_content() {
        let mut root = parse_document(
            r#"<svg><text data-text="name" x="3"><tspan>Placeholder</tspan></text></svg>"#,
        )
        .unwrap();
        let row = row_from_pairs([("name", "Hex bolt M4")]);
        let ctx = FilterContext::new(&row, MissingFieldPolicy::Fail);

        Filter::Text.apply_all(root.children_mut(), &ctx).unwrap();
        let text = root.find("text").unwrap();
        assert_eq!(text.text(), "Hex bolt M4");
        assert_eq!(text.attr("x"), Some("3"));
        assert!(!text.has_attr(TEXT_MARKER));
        assert!(root.find("tspan").is_none());
    }

    #[test]
    fn test_applying_twice_gives_same_text() {
        let row = row_from_pairs([("name", "Washer")]);
        let ctx = FilterContext::new(&row, MissingFieldPolicy::Fail);
        let mut nodes = vec![Node::Element(
            Element::new("text").with_attr(TEXT_MARKER, "name"),
        )];

        Filter::Text.apply_all(&mut nodes, &ctx).unwrap();
        let first = nodes[0].as_element().unwrap().text();
        Filter::Text.apply_all(&mut nodes, &ctx).unwrap();
        assert_eq!(nodes[0].as_element().unwrap().text(), first);
        assert_eq!(first, "Washer");
    }

    #[test]
    fn test_missing_field() {
        let row = row_from_pairs([("name", "Washer")]);
        let mut e = Element::new("text").with_attr(TEXT_MARKER, "price");

        let ctx = FilterContext::new(&row, MissingFieldPolicy::Fail);
        let err = apply(&mut e.clone(), &ctx).unwrap_err();
        assert!(matches!(err, TemplateError::FieldNotFound { field } if field == "price"));

        let ctx = FilterContext::new(&row, MissingFieldPolicy::Empty);
        apply(&mut e, &ctx).unwrap();
        assert_eq!(e.text(), "");
    }
}
