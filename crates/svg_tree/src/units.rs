//! Length literals with physical unit suffixes
//!
//! All lengths are normalized to pixels at the SVG/CSS reference resolution of
//! 96 pixels per inch. A literal without a suffix is already in pixels.

use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::error::UnitError;

/// Pixels per inch at the SVG reference resolution
pub const PIXELS_PER_INCH: f64 = 96.0;

/// Units accepted in length literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Bare number or `px`
    Pixel,
    /// `in`
    Inch,
    /// `mm`
    Millimeter,
    /// `cm`
    Centimeter,
    /// `pt`, 1/72 inch
    Point,
    /// `pc`, 12 points
    Pica,
}

impl LengthUnit {
    /// Look up a unit by suffix; the empty suffix means pixels
    pub fn from_suffix(suffix: &str) -> Option<LengthUnit> {
        match suffix.to_ascii_lowercase().as_str() {
            "" | "px" => Some(Self::Pixel),
            "in" => Some(Self::Inch),
            "mm" => Some(Self::Millimeter),
            "cm" => Some(Self::Centimeter),
            "pt" => Some(Self::Point),
            "pc" => Some(Self::Pica),
            _ => None,
        }
    }

    /// Canonical suffix for this unit
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Pixel => "px",
            Self::Inch => "in",
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Point => "pt",
            Self::Pica => "pc",
        }
    }

    /// Conversion ratio from one unit to pixels
    pub fn pixels_per_unit(&self) -> f64 {
        match self {
            Self::Pixel => 1.0,
            Self::Inch => PIXELS_PER_INCH,
            Self::Millimeter => PIXELS_PER_INCH / 25.4,
            Self::Centimeter => PIXELS_PER_INCH / 2.54,
            Self::Point => PIXELS_PER_INCH / 72.0,
            Self::Pica => PIXELS_PER_INCH / 6.0,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

fn length_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)\s*([A-Za-z%]*)\s*$")
            .expect("length pattern is valid")
    })
}

/// Split a literal into its numeric text and unit
fn split_length(text: &str) -> Result<(&str, LengthUnit), UnitError> {
    let caps = length_pattern()
        .captures(text)
        .ok_or_else(|| UnitError::Malformed(text.to_string()))?;

    let number = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let suffix = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

    let unit = LengthUnit::from_suffix(suffix).ok_or_else(|| UnitError::UnknownUnit {
        literal: text.to_string(),
        unit: suffix.to_string(),
    })?;

    Ok((number, unit))
}

/// Parse a length literal into its numeric value and unit
pub fn parse_length_with_unit(text: &str) -> Result<(f64, LengthUnit), UnitError> {
    let (number, unit) = split_length(text)?;
    let value = number
        .parse::<f64>()
        .map_err(|_| UnitError::Malformed(text.to_string()))?;
    Ok((value, unit))
}

/// Parse a length literal into pixels
pub fn parse_length(text: &str) -> Result<f64, UnitError> {
    let (value, unit) = parse_length_with_unit(text)?;
    Ok(value * unit.pixels_per_unit())
}

/// Strip a recognized unit suffix, returning the bare numeric text
pub fn clean(text: &str) -> Result<String, UnitError> {
    let (number, _) = split_length(text)?;
    Ok(number.to_string())
}

/// Format a number for an SVG attribute without trailing zeros
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.6}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
