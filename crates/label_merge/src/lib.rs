//! Label Sheet Merge
//!
//! This crate lays the rows of a data file out on printable label sheets,
//! one instantiated template per grid slot.
//!
//! # Features
//!
//! - Lazy CSV row streams with header validation
//! - Sheet geometry from INI files, in any supported length unit
//! - Row-major or column-major slot traversal with a configurable start slot
//! - Row selection by non-empty field or exact value
//! - Pluggable page output: files on disk or pages kept in memory
//!
//! # Example
//!
//! ```rust
//! use label_merge::{CsvParser, MemorySink, MergeConfig, MergeEngine, SheetGeometry};
//! use label_template::{Filter, Template, TemplateOptions};
//!
//! let template = Template::parse(
//!     r#"<svg viewBox="0 0 100 40" width="100"><text data-text="name"/></svg>"#,
//!     Filter::default_pipeline(),
//!     TemplateOptions::default(),
//! ).unwrap();
//! let geometry = SheetGeometry::from_ini_str(
//!     "[sheet]\nnrows=2\nncols=1\noffx=0\noffy=0\nincx=100\nincy=40\nsizex=100\nsizey=80\n",
//! ).unwrap();
//!
//! let engine = MergeEngine::new(MergeConfig::new(template, geometry)).unwrap();
//! let rows = CsvParser::new().parse_reader("name\nAlice\nBob\nCarol\n".as_bytes()).unwrap();
//! let mut sink = MemorySink::new();
//! let summary = engine.run_reader(rows, &mut sink).unwrap();
//!
//! assert_eq!(summary.pages, 2);
//! assert_eq!(sink.pages()[1].text(), "Carol");
//! ```

mod csv_parser;
mod data_source;
mod error;
pub mod grid;
pub mod merge_engine;
mod page_sink;
mod selection;
mod sheet_config;

pub use csv_parser::{CsvConfig, CsvParser};
pub use data_source::RowReader;
pub use error::{ConfigError, MergeError, Result};
pub use grid::{Cursor, Direction, GridPosition};
pub use merge_engine::{MergeConfig, MergeEngine, MergeSummary};
pub use page_sink::{FileSink, MemorySink, PageSink};
pub use selection::Selection;
pub use sheet_config::{SheetGeometry, SheetLength};
