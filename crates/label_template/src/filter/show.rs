//! Conditional visibility

use svg_tree::Element;

use super::{FilterAction, FilterContext};
use crate::error::Result;

/// Names the field that gates visibility
pub const SHOW_MARKER: &str = "data-show";
/// Optional value the field must equal
pub const SHOW_VALUE_MARKER: &str = "data-show-value";

pub(super) fn apply(element: &mut Element, ctx: &FilterContext<'_>) -> Result<FilterAction> {
    let field = element.attr(SHOW_MARKER).unwrap_or_default().to_string();
    let value = ctx.field(&field)?;

    let visible = match element.attr(SHOW_VALUE_MARKER) {
        Some(expected) => value == expected,
        None => !value.is_empty(),
    };

    if !visible {
        return Ok(FilterAction::Remove);
    }

    element.remove_attr(SHOW_MARKER);
    element.remove_attr(SHOW_VALUE_MARKER);
    Ok(FilterAction::Keep)
}
