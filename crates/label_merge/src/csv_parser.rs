//! CSV row sources

use std::fs::File;
use std::io::Read;
use std::path::Path;

use label_template::Row;

use crate::data_source::RowReader;
use crate::error::Result;

/// CSV parser configuration
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Delimiter character
    pub delimiter: char,
    /// Whether to trim whitespace from values
    pub trim_whitespace: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            trim_whitespace: false,
        }
    }
}

impl CsvConfig {
    /// Create a new CSV config with semicolon delimiter
    pub fn semicolon() -> Self {
        Self {
            delimiter: ';',
            ..Default::default()
        }
    }

    /// Create a new CSV config with tab delimiter
    pub fn tab() -> Self {
        Self {
            delimiter: '\t',
            ..Default::default()
        }
    }

    /// Config matching a file's extension: tab for `.tsv`, comma otherwise
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let is_tsv = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
        if is_tsv {
            Self::tab()
        } else {
            Self::default()
        }
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }
}

/// Opens CSV data as a lazy stream of rows. The first record is the header.
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    config: CsvConfig,
}

impl CsvParser {
    /// Create a new CSV parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new CSV parser with custom configuration
    pub fn with_config(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Open a CSV file
    pub fn open_file(&self, path: impl AsRef<Path>) -> Result<RowReader<File>> {
        let file = File::open(path.as_ref())?;
        self.parse_reader(file)
    }

    /// Read rows from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<RowReader<R>> {
        let csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter as u8)
            .has_headers(true)
            .trim(if self.config.trim_whitespace {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .flexible(true) // short records are padded by the row reader
            .from_reader(reader);
        RowReader::new(csv_reader)
    }

    /// Parse a whole CSV string eagerly
    pub fn parse_string(&self, data: &str) -> Result<Vec<Row>> {
        self.parse_reader(data.as_bytes())?.collect()
    }
}
