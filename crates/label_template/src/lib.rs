//! Label Templates
//!
//! This crate turns an SVG label template plus one row of data into the
//! concrete markup of one label.
//!
//! # Features
//!
//! - Attribute markers for visibility, text, barcodes, styles, embedded
//!   documents and `{{field}}` placeholders
//! - Code 128, Code 39, EAN-13 and UPC-A symbologies
//! - Namespace-agnostic element matching
//! - A configurable policy for fields missing from a row
//!
//! # Example
//!
//! ```rust
//! use label_template::{row_from_pairs, Filter, Template, TemplateOptions};
//!
//! let xml = r#"<svg width="2in" viewBox="0 0 96 48">
//!   <text data-text="name">Name</text>
//!   <rect data-show="fragile" data-show-value="yes" width="10" height="10"/>
//! </svg>"#;
//! let template = Template::parse(xml, Filter::default_pipeline(), TemplateOptions::default()).unwrap();
//! assert_eq!(template.viewbox_correction(), 0.5);
//!
//! let row = row_from_pairs([("name", "Alice"), ("fragile", "no")]);
//! let content = template.generate(&row).unwrap();
//! assert_eq!(content.len(), 1);
//! assert_eq!(content[0].as_element().unwrap().text(), "Alice");
//! ```

pub mod barcode;
mod error;
pub mod filter;
mod row;
mod template;

pub use barcode::{BarPattern, Symbology};
pub use error::{Result, TemplateError};
pub use filter::{Filter, FilterAction, FilterContext};
pub use row::{row_from_pairs, MissingFieldPolicy, Row};
pub use template::{Template, TemplateOptions};
