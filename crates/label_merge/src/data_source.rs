//! Lazy row streams

use std::collections::HashSet;
use std::io::Read;

use label_template::Row;

use crate::error::{MergeError, Result};

/// Iterator over the records of a header-led table, one [`Row`] per record.
///
/// Records are read on demand. Cells missing from a short record read as
/// empty strings; cells beyond the header are ignored.
pub struct RowReader<R> {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<R>,
    position: usize,
}

impl<R: Read> RowReader<R> {
    pub(crate) fn new(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(MergeError::DuplicateColumn(header.clone()));
            }
        }

        Ok(Self {
            headers,
            records: reader.into_records(),
            position: 0,
        })
    }

    /// Column names in header order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Number of records read so far
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        self.position += 1;

        let row = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), record.get(i).unwrap_or_default().to_string()))
            .collect();
        Some(Ok(row))
    }
}
