//! Label Sheet Merge Engine
//!
//! Pulls rows from a row source, instantiates the template for each eligible
//! row and places the result on the next free grid slot. A page is started
//! lazily by the first row that lands on it and is handed to the sink as soon
//! as its last slot is filled, or when the rows run out.

use std::io::Read;

use label_template::{Row, Template};
use serde::{Deserialize, Serialize};
use svg_tree::{format_number, Element};

use crate::data_source::RowReader;
use crate::error::Result;
use crate::grid::{placement, Cursor, Direction, GridPosition};
use crate::page_sink::PageSink;
use crate::selection::Selection;
use crate::sheet_config::SheetGeometry;

/// Everything a run needs, fixed before the first row is read
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub template: Template,
    pub geometry: SheetGeometry,
    pub direction: Direction,
    pub start: GridPosition,
    pub selection: Option<Selection>,
}

impl MergeConfig {
    pub fn new(template: Template, geometry: SheetGeometry) -> Self {
        Self {
            template,
            geometry,
            direction: Direction::default(),
            start: GridPosition::default(),
            selection: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_start(mut self, start: GridPosition) -> Self {
        self.start = start;
        self
    }

    pub fn with_selection(mut self, selection: Option<Selection>) -> Self {
        self.selection = selection;
        self
    }
}

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    pub rows_read: usize,
    pub rows_placed: usize,
    pub rows_skipped: usize,
    pub pages: usize,
}

enum PageState {
    NoActivePage,
    PageOpen(Element),
}

/// Lays rows out on label sheets
#[derive(Debug, Clone)]
pub struct MergeEngine {
    config: MergeConfig,
    first: Cursor,
}

impl MergeEngine {
    /// Validate the configuration. The starting slot must lie on the grid.
    pub fn new(config: MergeConfig) -> Result<Self> {
        let first = Cursor::new(&config.geometry, config.direction, config.start)?;
        Ok(Self { config, first })
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Run over a CSV row source. A selection must name one of its columns.
    pub fn run_reader<R: Read, S: PageSink + ?Sized>(
        &self,
        rows: RowReader<R>,
        sink: &mut S,
    ) -> Result<MergeSummary> {
        if let Some(selection) = &self.config.selection {
            selection.check_columns(rows.headers())?;
        }
        self.run(rows, sink)
    }

    /// Run over any row stream.
    ///
    /// The first error from the row stream, the template or the sink ends
    /// the run. Pages already emitted stay emitted; a partially filled page
    /// is dropped.
    pub fn run<I, S>(&self, rows: I, sink: &mut S) -> Result<MergeSummary>
    where
        I: IntoIterator<Item = Result<Row>>,
        S: PageSink + ?Sized,
    {
        let template = &self.config.template;
        let correction = template.viewbox_correction();
        let mut cursor = self.first;
        let mut state = PageState::NoActivePage;
        let mut summary = MergeSummary::default();

        for row in rows {
            let row = row?;
            summary.rows_read += 1;

            if let Some(selection) = &self.config.selection {
                if !selection.matches(&row) {
                    summary.rows_skipped += 1;
                    continue;
                }
            }

            let mut page = match state {
                PageState::PageOpen(page) => page,
                PageState::NoActivePage => self.open_page()?,
            };

            let position = cursor.position();
            let (x, y) = placement(&self.config.geometry, position);
            let mut group = Element::new(page.sibling_name("g")).with_attr(
                "transform",
                format!(
                    "translate({} {})",
                    format_number(x * correction),
                    format_number(y * correction)
                ),
            );
            for node in template.generate(&row)? {
                group.append(node);
            }
            page.append(group);
            summary.rows_placed += 1;
            tracing::debug!(
                row = summary.rows_read,
                grid_row = position.row,
                grid_col = position.col,
                "label placed"
            );

            state = if cursor.advance() {
                self.emit(sink, summary.pages, &page)?;
                summary.pages += 1;
                PageState::NoActivePage
            } else {
                PageState::PageOpen(page)
            };
        }

        if let PageState::PageOpen(page) = state {
            self.emit(sink, summary.pages, &page)?;
            summary.pages += 1;
        }

        tracing::info!(
            rows_read = summary.rows_read,
            rows_placed = summary.rows_placed,
            rows_skipped = summary.rows_skipped,
            pages = summary.pages,
            "label sheet complete"
        );
        Ok(summary)
    }

    fn open_page(&self) -> Result<Element> {
        let geometry = &self.config.geometry;
        let correction = self.config.template.viewbox_correction();

        let mut page = self.config.template.clone_base();
        page.set_attr("width", geometry.sizex.cleaned()?);
        page.set_attr("height", geometry.sizey.cleaned()?);
        page.set_attr(
            "viewBox",
            format!(
                "0 0 {} {}",
                format_number(geometry.sizex.pixels() * correction),
                format_number(geometry.sizey.pixels() * correction)
            ),
        );
        Ok(page)
    }

    fn emit<S: PageSink + ?Sized>(&self, sink: &mut S, index: usize, page: &Element) -> Result<()> {
        sink.emit(index, page)?;
        tracing::info!(page = index, labels = page.children().len(), "page emitted");
        Ok(())
    }
}
