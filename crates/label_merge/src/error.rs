//! Error types for label sheet runs

use label_template::TemplateError;
use svg_tree::{SvgError, UnitError};
use thiserror::Error;

/// Invalid run configuration, detected before any row is processed
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required sheet key is absent
    #[error("Missing sheet setting '{key}' ({description})")]
    MissingKey {
        key: &'static str,
        description: &'static str,
    },

    /// A sheet key is present but cannot be used
    #[error("Invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The configuration source itself could not be read
    #[error("Cannot read sheet configuration: {0}")]
    Source(#[from] config::ConfigError),

    /// A starting index lies outside the grid
    #[error("Starting {axis} {start} is outside the grid (must be below {max})")]
    StartOutOfBounds {
        axis: &'static str,
        start: usize,
        max: usize,
    },

    /// A selection expression could not be parsed
    #[error("Invalid selection '{0}'")]
    InvalidSelection(String),

    /// A selection names a column the data does not have
    #[error("Selection field '{0}' is not a column of the data")]
    UnknownSelectionField(String),

    /// Unrecognized traversal direction
    #[error("Unknown direction '{0}', expected 'row' or 'col'")]
    UnknownDirection(String),
}

/// Errors that can occur while producing a label sheet
#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Error reading CSV data
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Duplicate column names in the data header
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error(transparent)]
    Svg(#[from] SvgError),

    /// IO error reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for label sheet operations
pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_names_its_meaning() {
        let err = MergeError::from(ConfigError::MissingKey {
            key: "incx",
            description: "horizontal distance between labels",
        });
        assert_eq!(
            err.to_string(),
            "Missing sheet setting 'incx' (horizontal distance between labels)"
        );
    }

    #[test]
    fn test_start_out_of_bounds_display() {
        let err = ConfigError::StartOutOfBounds {
            axis: "row",
            start: 5,
            max: 5,
        };
        assert_eq!(
            err.to_string(),
            "Starting row 5 is outside the grid (must be below 5)"
        );
    }
}
