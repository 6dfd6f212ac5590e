//! Error types for the SVG tree crate

use thiserror::Error;

/// Errors raised while converting length literals
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// The numeric part of the literal could not be read
    #[error("Malformed length '{0}'")]
    Malformed(String),

    /// The literal carries a suffix that is not in the unit table
    #[error("Unknown unit '{unit}' in length '{literal}'")]
    UnknownUnit { literal: String, unit: String },
}

/// Errors that can occur while reading, writing, or inspecting SVG trees
#[derive(Debug, Error)]
pub enum SvgError {
    /// Invalid length literal
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// XML error from quick-xml
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Structurally invalid markup (unbalanced tags, no root, ...)
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// IO error reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for SVG tree operations
pub type Result<T> = std::result::Result<T, SvgError>;
