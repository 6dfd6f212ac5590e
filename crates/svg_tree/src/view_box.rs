//! The `viewBox` attribute

use std::fmt;
use std::str::FromStr;

use crate::error::UnitError;
use crate::units::format_number;

/// A parsed `viewBox`: user-space origin and extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }
}

impl FromStr for ViewBox {
    type Err = UnitError;

    /// Four numbers separated by whitespace and/or commas; width and height
    /// must be positive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 4 {
            return Err(UnitError::Malformed(s.to_string()));
        }

        let mut values = [0.0; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| UnitError::Malformed(s.to_string()))?;
        }

        if values[2] <= 0.0 || values[3] <= 0.0 {
            return Err(UnitError::Malformed(s.to_string()));
        }

        Ok(ViewBox::new(values[0], values[1], values[2], values[3]))
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            format_number(self.min_x),
            format_number(self.min_y),
            format_number(self.width),
            format_number(self.height)
        )
    }
}
