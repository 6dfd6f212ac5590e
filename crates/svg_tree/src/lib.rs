//! SVG Tree
//!
//! A small, owned element tree for SVG documents together with the length
//! conversions needed to place things on a physical sheet.
//!
//! # Features
//!
//! - Deep-cloneable element tree with namespace-agnostic tag matching
//! - Reading documents with quick-xml, writing them back out
//! - Length literals with `px`, `in`, `mm`, `cm`, `pt` and `pc` suffixes
//!
//! # Example
//!
//! ```rust
//! use svg_tree::{parse_document, parse_length, write_document};
//!
//! let root = parse_document(r#"<svg width="62mm"><rect x="1"/></svg>"#).unwrap();
//! assert!(root.find("rect").is_some());
//!
//! let width = parse_length(root.attr("width").unwrap()).unwrap();
//! assert!((width - 234.33).abs() < 0.01);
//!
//! let xml = write_document(&root).unwrap();
//! assert!(xml.contains("<rect x=\"1\"/>"));
//! ```

mod error;
mod node;
mod parser;
pub mod units;
mod view_box;
mod writer;

pub use error::{Result, SvgError, UnitError};
pub use node::{local_name, name_prefix, Attribute, Descendants, Element, Node, SVG_NS};
pub use parser::{parse_document, parse_file};
pub use units::{clean, format_number, parse_length, parse_length_with_unit, LengthUnit};
pub use view_box::ViewBox;
pub use writer::{write_document, write_file, write_to};
