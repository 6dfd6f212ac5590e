//! Error types for label templates

use svg_tree::UnitError;
use thiserror::Error;

/// Errors that can occur while loading a template or instantiating a row
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template could not be read, parsed, or has an unexpected structure
    #[error("Template load error: {0}")]
    Load(String),

    /// A marker names a field the row does not have
    #[error("Field not found: {field}")]
    FieldNotFound { field: String },

    /// A row value cannot be encoded in the requested symbology
    #[error("Cannot encode '{value}' as {symbology}: {reason}")]
    BarcodeEncoding {
        symbology: String,
        value: String,
        reason: String,
    },

    /// An external document could not be embedded
    #[error("Cannot embed '{path}': {reason}")]
    Embed { path: String, reason: String },

    /// Invalid length literal in the template
    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl TemplateError {
    pub(crate) fn load(message: impl Into<String>) -> Self {
        TemplateError::Load(message.into())
    }

    /// True for errors caused by the data of a single row
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            TemplateError::FieldNotFound { .. }
                | TemplateError::BarcodeEncoding { .. }
                | TemplateError::Embed { .. }
        )
    }
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TemplateError::BarcodeEncoding {
            symbology: "ean13".to_string(),
            value: "123".to_string(),
            reason: "expected 12 or 13 digits".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot encode '123' as ean13: expected 12 or 13 digits"
        );
        assert!(err.is_row_error());

        let err = TemplateError::load("root element is <html>, expected <svg>");
        assert!(!err.is_row_error());
    }
}
