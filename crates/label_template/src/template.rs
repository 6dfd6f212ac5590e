//! Template Engine
//!
//! A [`Template`] holds the parsed base document of one label. It is never
//! mutated after load; every row works on its own deep copy of the base
//! content, so filters cannot leak state between rows.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use svg_tree::{parse_document, parse_length, Element, Node, ViewBox};

use crate::error::{Result, TemplateError};
use crate::filter::{Filter, FilterContext};
use crate::row::{MissingFieldPolicy, Row};

/// Load-time options for a template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateOptions {
    /// How filters treat fields the row does not carry
    pub missing_field: MissingFieldPolicy,
    /// Directory that relative paths in row values resolve against
    pub base_dir: Option<PathBuf>,
}

impl TemplateOptions {
    pub fn with_missing_field(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_field = policy;
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }
}

/// A parsed label template
#[derive(Debug, Clone)]
pub struct Template {
    base: Element,
    correction: f64,
    filters: Vec<Filter>,
    options: TemplateOptions,
}

impl Template {
    /// Load a template file. Relative embed paths resolve against the
    /// file's directory unless the options name another one.
    pub fn from_file(
        path: impl AsRef<Path>,
        filters: Vec<Filter>,
        mut options: TemplateOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|e| {
            TemplateError::load(format!("cannot read {}: {}", path.display(), e))
        })?;
        if options.base_dir.is_none() {
            options.base_dir = path.parent().map(Path::to_path_buf);
        }
        Self::parse(&xml, filters, options)
    }

    /// Parse a template from markup
    pub fn parse(xml: &str, filters: Vec<Filter>, options: TemplateOptions) -> Result<Self> {
        let root = parse_document(xml).map_err(|e| TemplateError::load(e.to_string()))?;
        Self::new(root, filters, options)
    }

    /// Build a template from an already parsed root element
    pub fn new(root: Element, filters: Vec<Filter>, options: TemplateOptions) -> Result<Self> {
        if !root.is("svg") {
            return Err(TemplateError::load(format!(
                "root element is <{}>, expected <svg>",
                root.name()
            )));
        }

        let correction = correction_factor(&root)?;

        for element in root.descendants() {
            for filter in &filters {
                filter.validate(element)?;
            }
        }

        tracing::debug!(
            correction,
            filters = filters.len(),
            policy = options.missing_field.as_str(),
            "template loaded"
        );

        Ok(Self {
            base: root,
            correction,
            filters,
            options,
        })
    }

    /// A fresh root carrying the template's attributes and no children
    pub fn clone_base(&self) -> Element {
        self.base.shallow_clone()
    }

    /// Instantiate the template for one row: a deep copy of the base
    /// content with every filter applied in order.
    pub fn generate(&self, row: &Row) -> Result<Vec<Node>> {
        let mut content = self.base.children().to_vec();
        let ctx = FilterContext::new(row, self.options.missing_field)
            .with_base_dir(self.options.base_dir.as_deref());
        for filter in &self.filters {
            filter.apply_all(&mut content, &ctx)?;
        }
        Ok(content)
    }

    /// Ratio of the template's user units to physical pixels
    pub fn viewbox_correction(&self) -> f64 {
        self.correction
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    /// The unmodified base document
    pub fn base(&self) -> &Element {
        &self.base
    }
}

fn correction_factor(root: &Element) -> Result<f64> {
    let view_box = match root.attr_local("viewBox") {
        Some(raw) => Some(raw.parse::<ViewBox>().map_err(|e| {
            TemplateError::load(format!("malformed viewBox '{}': {}", raw, e))
        })?),
        None => None,
    };

    let Some(view_box) = view_box else {
        tracing::warn!("template has no viewBox; user units are taken as pixels");
        return Ok(1.0);
    };

    match root.attr_local("width") {
        Some(width) => {
            let width = parse_length(width).map_err(|e| {
                TemplateError::load(format!("invalid root width '{}': {}", width, e))
            })?;
            if width > 0.0 {
                Ok(view_box.width / width)
            } else {
                Ok(1.0)
            }
        }
        None => Ok(1.0),
    }
}
