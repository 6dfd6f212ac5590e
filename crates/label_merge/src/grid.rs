//! Grid traversal
//!
//! Slots on a sheet are visited along a minor axis first, then a major
//! axis. With [`Direction::Row`] the cursor walks across a row of labels
//! before moving down; with [`Direction::Col`] it walks down a column before
//! moving right.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sheet_config::SheetGeometry;

/// Order in which grid slots are filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Fill each row left to right, then move down
    Row,
    /// Fill each column top to bottom, then move right
    #[default]
    Col,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Row => "row",
            Direction::Col => "col",
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "row" => Ok(Direction::Row),
            "col" => Ok(Direction::Col),
            _ => Err(ConfigError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A slot on the sheet, zero-based from the top-left
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Position of the next free slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    direction: Direction,
    minor: usize,
    major: usize,
    minor_max: usize,
    major_max: usize,
}

impl Cursor {
    /// Place a cursor at `start`, which must lie inside the grid
    pub fn new(
        geometry: &SheetGeometry,
        direction: Direction,
        start: GridPosition,
    ) -> Result<Self, ConfigError> {
        if start.row >= geometry.nrows {
            return Err(ConfigError::StartOutOfBounds {
                axis: "row",
                start: start.row,
                max: geometry.nrows,
            });
        }
        if start.col >= geometry.ncols {
            return Err(ConfigError::StartOutOfBounds {
                axis: "column",
                start: start.col,
                max: geometry.ncols,
            });
        }

        let cursor = match direction {
            Direction::Row => Self {
                direction,
                minor: start.col,
                major: start.row,
                minor_max: geometry.ncols,
                major_max: geometry.nrows,
            },
            Direction::Col => Self {
                direction,
                minor: start.row,
                major: start.col,
                minor_max: geometry.nrows,
                major_max: geometry.ncols,
            },
        };
        Ok(cursor)
    }

    pub fn position(&self) -> GridPosition {
        match self.direction {
            Direction::Row => GridPosition::new(self.major, self.minor),
            Direction::Col => GridPosition::new(self.minor, self.major),
        }
    }

    /// Zero-based slot number in traversal order
    pub fn slot(&self) -> usize {
        self.major * self.minor_max + self.minor
    }

    /// Step to the next slot. Returns true when the page is full, in which
    /// case the cursor wraps to the first slot of the next page.
    pub fn advance(&mut self) -> bool {
        self.minor += 1;
        if self.minor < self.minor_max {
            return false;
        }
        self.minor = 0;
        self.major += 1;
        if self.major < self.major_max {
            return false;
        }
        self.major = 0;
        true
    }
}

/// Top-left corner of a slot, in pixels
pub fn placement(geometry: &SheetGeometry, position: GridPosition) -> (f64, f64) {
    let x = geometry.offx.pixels() + position.col as f64 * geometry.incx.pixels();
    let y = geometry.offy.pixels() + position.row as f64 * geometry.incy.pixels();
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn geometry(nrows: usize, ncols: usize) -> SheetGeometry {
        let ini = format!(
            "[sheet]\nnrows={}\nncols={}\noffx=10\noffy=20\nincx=100\nincy=50\nsizex=1000\nsizey=1000\n",
            nrows, ncols
        );
        SheetGeometry::from_ini_str(&ini).unwrap()
    }

    fn walk(cursor: &mut Cursor, steps: usize) -> Vec<(usize, usize)> {
        (0..steps)
            .map(|_| {
                let p = cursor.position();
                cursor.advance();
                (p.row, p.col)
            })
            .collect()
    }

    #[test]
    fn test_row_direction_fills_across() {
        let mut c = Cursor::new(&geometry(2, 3), Direction::Row, GridPosition::default()).unwrap();
        assert_eq!(
            walk(&mut c, 6),
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_col_direction_fills_down() {
        let mut c = Cursor::new(&geometry(2, 3), Direction::Col, GridPosition::default()).unwrap();
        assert_eq!(
            walk(&mut c, 6),
            vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]
        );
    }

    #[test]
    fn test_advance_reports_full_page() {
        let mut c = Cursor::new(&geometry(2, 2), Direction::Row, GridPosition::new(1, 0)).unwrap();
        assert_eq!(c.slot(), 2);
        assert!(!c.advance());
        assert!(c.advance());
        assert_eq!(c.position(), GridPosition::new(0, 0));
    }

    #[test]
    fn test_start_bounds() {
        let g = geometry(2, 3);
        assert!(Cursor::new(&g, Direction::Col, GridPosition::new(1, 2)).is_ok());
        assert!(matches!(
            Cursor::new(&g, Direction::Col, GridPosition::new(2, 0)),
            Err(ConfigError::StartOutOfBounds { axis: "row", .. })
        ));
        assert!(matches!(
            Cursor::new(&g, Direction::Row, GridPosition::new(0, 3)),
            Err(ConfigError::StartOutOfBounds { axis: "column", .. })
        ));
    }

    #[test]
    fn test_placement() {
        let g = geometry(2, 3);
        assert_eq!(placement(&g, GridPosition::new(0, 0)), (10.0, 20.0));
        assert_eq!(placement(&g, GridPosition::new(1, 2)), (210.0, 70.0));
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("ROW".parse::<Direction>().unwrap(), Direction::Row);
        assert_eq!("col".parse::<Direction>().unwrap(), Direction::Col);
        assert_eq!(Direction::default(), Direction::Col);
        assert!("diagonal".parse::<Direction>().is_err());
    }

    proptest! {
        #[test]
        fn cursor_stays_in_bounds(
            nrows in 1usize..6,
            ncols in 1usize..6,
            steps in 0usize..80,
            by_row in any::<bool>(),
        ) {
            let g = geometry(nrows, ncols);
            let direction = if by_row { Direction::Row } else { Direction::Col };
            let mut c = Cursor::new(&g, direction, GridPosition::default()).unwrap();
            for i in 0..steps {
                let p = c.position();
                prop_assert!(p.row < nrows && p.col < ncols);
                prop_assert_eq!(c.slot(), i % (nrows * ncols));
                c.advance();
            }
        }
    }
}
