//! Template filters
//!
//! A filter recognizes one attribute marker convention and rewrites the
//! marked element using the current row. The set of filters is closed; each
//! variant is dispatched through [`Filter::apply`].
//!
//! Filters run one full pass each, in the order given to the template. Each
//! pass walks the tree in document order (pre-order). A removed element is
//! never descended into, and nodes produced by a replacement are not
//! revisited by the filter that produced them.

mod barcode;
mod embed;
mod show;
mod style;
mod substitute;
mod text;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use svg_tree::{parse_length, Element, Node};

use crate::error::Result;
use crate::row::{MissingFieldPolicy, Row};

pub use barcode::{BARCODE_MARKER, BARCODE_TYPE_MARKER};
pub use embed::EMBED_MARKER;
pub use show::{SHOW_MARKER, SHOW_VALUE_MARKER};
pub use style::{merge_style, STYLE_DEFAULT_MARKER, STYLE_MAP_MARKER, STYLE_MARKER};
pub use substitute::SUBST_MARKER;
pub use text::TEXT_MARKER;

/// The closed set of filter kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Remove elements whose field is empty or differs from a given value
    Show,
    /// Replace element text with a field value
    Text,
    /// Replace a box with the bars of an encoded field value
    Barcode,
    /// Merge conditional style declarations into `style`
    Style,
    /// Replace a box with an external SVG document named by a field
    Embed,
    /// Expand `{{field}}` placeholders in attributes and text
    Substitute,
}

/// Outcome of applying a filter to one element
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    /// Keep the element (possibly modified) and descend into its children
    Keep,
    /// Drop the element and its subtree from the parent
    Remove,
    /// Put these nodes in the element's place
    Replace(Vec<Node>),
}

/// Per-row inputs shared by all filters
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub row: &'a Row,
    pub policy: MissingFieldPolicy,
    /// Directory that relative paths in row values resolve against
    pub base_dir: Option<&'a Path>,
}

impl<'a> FilterContext<'a> {
    pub fn new(row: &'a Row, policy: MissingFieldPolicy) -> Self {
        Self {
            row,
            policy,
            base_dir: None,
        }
    }

    pub fn with_base_dir(mut self, base_dir: Option<&'a Path>) -> Self {
        self.base_dir = base_dir;
        self
    }

    /// Value of `field` under the template's missing-field policy
    pub fn field(&self, field: &str) -> Result<&'a str> {
        self.policy.lookup(self.row, field)
    }
}

impl Filter {
    /// All filters in the default declared order. Visibility runs first so
    /// later filters never act on a hidden element.
    pub fn default_pipeline() -> Vec<Filter> {
        vec![
            Filter::Show,
            Filter::Text,
            Filter::Barcode,
            Filter::Style,
            Filter::Embed,
            Filter::Substitute,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::Show => "show",
            Filter::Text => "text",
            Filter::Barcode => "barcode",
            Filter::Style => "style",
            Filter::Embed => "embed",
            Filter::Substitute => "substitute",
        }
    }

    /// The attribute whose presence marks an element for this filter
    pub fn marker(&self) -> &'static str {
        match self {
            Filter::Show => SHOW_MARKER,
            Filter::Text => TEXT_MARKER,
            Filter::Barcode => BARCODE_MARKER,
            Filter::Style => STYLE_MARKER,
            Filter::Embed => EMBED_MARKER,
            Filter::Substitute => SUBST_MARKER,
        }
    }

    /// True if `element` carries this filter's marker
    pub fn matches(&self, element: &Element) -> bool {
        element.has_attr(self.marker())
    }

    /// Load-time check of a marked element's static markup
    pub fn validate(&self, element: &Element) -> Result<()> {
        if !self.matches(element) {
            return Ok(());
        }
        match self {
            Filter::Barcode => barcode::validate(element),
            Filter::Style => style::validate(element),
            _ => Ok(()),
        }
    }

    /// Apply this filter to one element
    pub fn apply(&self, element: &mut Element, ctx: &FilterContext<'_>) -> Result<FilterAction> {
        if !self.matches(element) {
            return Ok(FilterAction::Keep);
        }
        match self {
            Filter::Show => show::apply(element, ctx),
            Filter::Text => text::apply(element, ctx),
            Filter::Barcode => barcode::apply(element, ctx),
            Filter::Style => style::apply(element, ctx),
            Filter::Embed => embed::apply(element, ctx),
            Filter::Substitute => substitute::apply(element, ctx),
        }
    }

    /// Run one full pass of this filter over a list of sibling nodes
    pub fn apply_all(&self, nodes: &mut Vec<Node>, ctx: &FilterContext<'_>) -> Result<()> {
        let mut i = 0;
        while i < nodes.len() {
            let action = match &mut nodes[i] {
                Node::Element(element) => self.apply(element, ctx)?,
                _ => {
                    i += 1;
                    continue;
                }
            };

            match action {
                FilterAction::Keep => {
                    if let Node::Element(element) = &mut nodes[i] {
                        self.apply_all(element.children_mut(), ctx)?;
                    }
                    i += 1;
                }
                FilterAction::Remove => {
                    nodes.remove(i);
                }
                FilterAction::Replace(replacement) => {
                    let count = replacement.len();
                    nodes.splice(i..=i, replacement);
                    i += count;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rectangle described by an element's `x`, `y`, `width` and `height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BoxGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxGeometry {
    /// Missing attributes read as zero
    pub fn from_element(element: &Element) -> Result<Self> {
        let read = |name: &str| -> Result<f64> {
            match element.attr_local(name) {
                Some(v) => Ok(parse_length(v)?),
                None => Ok(0.0),
            }
        };
        Ok(Self {
            x: read("x")?,
            y: read("y")?,
            width: read("width")?,
            height: read("height")?,
        })
    }
}

/// Attributes a replacement group inherits from the element it replaces
const INHERITED_ATTRIBUTES: [&str; 5] = ["id", "class", "style", "transform", "fill"];

/// A `g` in the element's namespace carrying its presentation attributes
pub(crate) fn replacement_group(element: &Element) -> Element {
    let mut group = Element::new(element.sibling_name("g"));
    for name in INHERITED_ATTRIBUTES {
        if let Some(value) = element.attr(name) {
            group.set_attr(name, value);
        }
    }
    group
}
