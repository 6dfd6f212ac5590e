//! Conditional styling

use std::collections::HashMap;

use svg_tree::Element;

use super::{FilterAction, FilterContext};
use crate::error::{Result, TemplateError};

/// Names the field whose value selects a style
pub const STYLE_MARKER: &str = "data-style";
/// JSON object mapping field values to style declarations
pub const STYLE_MAP_MARKER: &str = "data-style-map";
/// Declarations applied when no mapping entry matches
pub const STYLE_DEFAULT_MARKER: &str = "data-style-default";

fn style_map(element: &Element) -> Result<HashMap<String, String>> {
    let Some(raw) = element.attr(STYLE_MAP_MARKER) else {
        return Ok(HashMap::new());
    };
    serde_json::from_str(raw).map_err(|e| {
        TemplateError::load(format!("invalid {} '{}': {}", STYLE_MAP_MARKER, raw, e))
    })
}

pub(super) fn validate(element: &Element) -> Result<()> {
    style_map(element).map(|_| ())
}

pub(super) fn apply(element: &mut Element, ctx: &FilterContext<'_>) -> Result<FilterAction> {
    let field = element.attr(STYLE_MARKER).unwrap_or_default().to_string();
    let value = ctx.field(&field)?;
    let map = style_map(element)?;

    let chosen = map
        .get(value)
        .map(String::as_str)
        .or_else(|| element.attr(STYLE_DEFAULT_MARKER))
        .map(str::to_string);

    if let Some(overlay) = chosen {
        let merged = merge_style(element.attr("style"), &overlay);
        element.set_attr("style", merged);
    }

    element.remove_attr(STYLE_MARKER);
    element.remove_attr(STYLE_MAP_MARKER);
    element.remove_attr(STYLE_DEFAULT_MARKER);
    Ok(FilterAction::Keep)
}

fn declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Merge `overlay` declarations into `base`, overriding same-named
/// properties in place and appending new ones.
pub fn merge_style(base: Option<&str>, overlay: &str) -> String {
    let mut merged = declarations(base.unwrap_or_default());
    for (name, value) in declarations(overlay) {
        match merged.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => merged.push((name, value)),
        }
    }
    merged
        .iter()
        .map(|(n, v)| format!("{}:{}", n, v))
        .collect::<Vec<_>>()
        .join(";")
}
