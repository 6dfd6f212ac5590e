//! Linear barcode symbologies
//!
//! Each encoder turns a value into a module sequence: one `bool` per
//! narrowest bar/space unit, `true` for dark. Quiet zones are not included;
//! the template leaves room for them.

mod code128;
mod code39;
mod ean;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TemplateError};

/// Supported symbologies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    #[default]
    Code128,
    Code39,
    Ean13,
    UpcA,
}

impl Symbology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbology::Code128 => "code128",
            Symbology::Code39 => "code39",
            Symbology::Ean13 => "ean13",
            Symbology::UpcA => "upca",
        }
    }

    /// Encode `value` into a module pattern
    pub fn encode(&self, value: &str) -> Result<BarPattern> {
        let modules = match self {
            Symbology::Code128 => code128::encode(value),
            Symbology::Code39 => code39::encode(value),
            Symbology::Ean13 => ean::encode_ean13(value),
            Symbology::UpcA => ean::encode_upca(value),
        };

        modules
            .map(|modules| BarPattern { modules })
            .map_err(|reason| TemplateError::BarcodeEncoding {
                symbology: self.as_str().to_string(),
                value: value.to_string(),
                reason,
            })
    }
}

impl FromStr for Symbology {
    type Err = TemplateError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "code128" => Ok(Symbology::Code128),
            "code39" => Ok(Symbology::Code39),
            "ean13" | "ean" => Ok(Symbology::Ean13),
            "upca" | "upc" => Ok(Symbology::UpcA),
            _ => Err(TemplateError::load(format!("unknown barcode symbology '{}'", s))),
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An encoded barcode as a sequence of equal-width modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarPattern {
    modules: Vec<bool>,
}

impl BarPattern {
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Total width in modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Dark runs as `(start_module, width_in_modules)`
    pub fn bars(&self) -> Vec<(usize, usize)> {
        let mut bars = Vec::new();
        let mut start = None;
        for (i, &dark) in self.modules.iter().enumerate() {
            match (dark, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    bars.push((s, i - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            bars.push((s, self.modules.len() - s));
        }
        bars
    }
}

/// Expand alternating bar/space widths, starting with a bar
pub(crate) fn expand_widths(widths: &[u8], modules: &mut Vec<bool>) {
    for (i, &w) in widths.iter().enumerate() {
        let dark = i % 2 == 0;
        modules.extend(std::iter::repeat(dark).take(w as usize));
    }
}
