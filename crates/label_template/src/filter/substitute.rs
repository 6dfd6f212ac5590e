//! `{{field}}` expansion in attributes and text

use std::sync::OnceLock;

use regex_lite::Regex;
use svg_tree::{Element, Node};

use super::{FilterAction, FilterContext};
use crate::error::Result;

/// Presence marks an element for placeholder expansion
pub const SUBST_MARKER: &str = "data-subst";

fn placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// Replace every `{{field}}` in `text` with the row's value
pub(crate) fn expand(text: &str, ctx: &FilterContext<'_>) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in placeholder().captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(ctx.field(name.as_str())?);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

pub(super) fn apply(element: &mut Element, ctx: &FilterContext<'_>) -> Result<FilterAction> {
    element.remove_attr(SUBST_MARKER);

    for attr in element.attributes_mut() {
        if attr.value.contains("{{") {
            attr.value = expand(&attr.value, ctx)?;
        }
    }

    for child in element.children_mut().iter_mut() {
        if let Node::Text(text) = child {
            if text.contains("{{") {
                *text = expand(text, ctx)?;
            }
        }
    }

    Ok(FilterAction::Keep)
}
