//! Sheet geometry
//!
//! Geometry is read from the `[sheet]` section of an INI file:
//!
//! ```ini
//! [sheet]
//! nrows = 10
//! ncols = 3
//! offx = 4.8mm
//! offy = 12.7mm
//! incx = 69.9mm
//! incy = 25.4mm
//! sizex = 215.9mm
//! sizey = 279.4mm
//! ```
//!
//! Every key is required. Lengths take any unit suffix understood by
//! [`svg_tree::parse_length`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use svg_tree::{clean, parse_length, UnitError};

use crate::error::{ConfigError, Result};

const SECTION: &str = "sheet";

/// A length as written in the configuration, with its pixel value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SheetLength {
    literal: String,
    pixels: f64,
}

impl SheetLength {
    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn pixels(&self) -> f64 {
        self.pixels
    }

    /// The literal with its unit suffix removed
    pub fn cleaned(&self) -> Result<String> {
        Ok(clean(&self.literal)?)
    }
}

impl FromStr for SheetLength {
    type Err = UnitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self {
            literal: s.trim().to_string(),
            pixels: parse_length(s)?,
        })
    }
}

impl TryFrom<String> for SheetLength {
    type Error = UnitError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SheetLength> for String {
    fn from(length: SheetLength) -> Self {
        length.literal
    }
}

impl fmt::Display for SheetLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// Physical layout of a label sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetGeometry {
    /// Number of label rows (vertical elements)
    pub nrows: usize,
    /// Number of label columns (horizontal elements)
    pub ncols: usize,
    /// Horizontal offset of the first column
    pub offx: SheetLength,
    /// Vertical offset of the first row
    pub offy: SheetLength,
    /// Horizontal distance between columns
    pub incx: SheetLength,
    /// Vertical distance between rows
    pub incy: SheetLength,
    /// Sheet width
    pub sizex: SheetLength,
    /// Sheet height
    pub sizey: SheetLength,
}

impl SheetGeometry {
    /// Load geometry from an INI file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = File::from(path.as_ref()).format(FileFormat::Ini);
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(ConfigError::from)?;
        Self::from_config(&config)
    }

    /// Load geometry from INI text
    pub fn from_ini_str(ini: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(ini, FileFormat::Ini))
            .build()
            .map_err(ConfigError::from)?;
        Self::from_config(&config)
    }

    /// Read the `[sheet]` keys from an already built configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let geometry = Self {
            nrows: count(config, "nrows", "number of rows (vertical elements)")?,
            ncols: count(config, "ncols", "number of columns (horizontal elements)")?,
            offx: length(config, "offx", "initial horizontal offset")?,
            offy: length(config, "offy", "initial vertical offset")?,
            incx: length(config, "incx", "horizontal spacing")?,
            incy: length(config, "incy", "vertical spacing")?,
            sizex: length(config, "sizex", "sheet width")?,
            sizey: length(config, "sizey", "sheet height")?,
        };
        tracing::debug!(
            nrows = geometry.nrows,
            ncols = geometry.ncols,
            width = %geometry.sizex,
            height = %geometry.sizey,
            "sheet geometry loaded"
        );
        Ok(geometry)
    }

    /// Labels per page
    pub fn capacity(&self) -> usize {
        self.nrows * self.ncols
    }
}

fn raw(config: &Config, key: &'static str, description: &'static str) -> Result<String> {
    match config.get_string(&format!("{}.{}", SECTION, key)) {
        Ok(value) => Ok(value),
        Err(config::ConfigError::NotFound(_)) => {
            Err(ConfigError::MissingKey { key, description }.into())
        }
        Err(e) => Err(ConfigError::from(e).into()),
    }
}

fn count(config: &Config, key: &'static str, description: &'static str) -> Result<usize> {
    let value = raw(config, key, description)?;
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.clone(),
        reason: reason.to_string(),
    };
    let n: usize = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number"))?;
    if n == 0 {
        return Err(invalid("must be at least 1").into());
    }
    Ok(n)
}

fn length(config: &Config, key: &'static str, description: &'static str) -> Result<SheetLength> {
    let value = raw(config, key, description)?;
    Ok(value.parse()?)
}
