//! Page output

use std::path::{Path, PathBuf};

use svg_tree::{write_file, Element};

use crate::error::Result;

/// Receives finished pages in order, starting at index 0
pub trait PageSink {
    fn emit(&mut self, index: usize, page: &Element) -> Result<()>;
}

/// Writes each page to `<base>_<index>.svg`
#[derive(Debug, Clone)]
pub struct FileSink {
    base: String,
    written: Vec<PathBuf>,
}

impl FileSink {
    /// `output` names the sheet; a trailing `.svg` (any case) is dropped
    /// to form the base of the page file names.
    pub fn new(output: impl AsRef<Path>) -> Self {
        let output = output.as_ref().to_string_lossy().into_owned();
        let base = match output.len().checked_sub(4) {
            Some(cut)
                if output.is_char_boundary(cut) && output[cut..].eq_ignore_ascii_case(".svg") =>
            {
                output[..cut].to_string()
            }
            _ => output,
        };
        Self {
            base,
            written: Vec::new(),
        }
    }

    pub fn page_path(&self, index: usize) -> PathBuf {
        PathBuf::from(format!("{}_{}.svg", self.base, index))
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl PageSink for FileSink {
    fn emit(&mut self, index: usize, page: &Element) -> Result<()> {
        let path = self.page_path(index);
        write_file(&path, page)?;
        tracing::debug!(path = %path.display(), "page written");
        self.written.push(path);
        Ok(())
    }
}

/// Keeps pages in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pages: Vec<Element>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[Element] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Element> {
        self.pages
    }
}

impl PageSink for MemorySink {
    fn emit(&mut self, _index: usize, page: &Element) -> Result<()> {
        self.pages.push(page.clone());
        Ok(())
    }
}
