//! Rows of field values and the policy for absent fields

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TemplateError};

/// A single record: field name to field value
pub type Row = HashMap<String, String>;

/// What a filter does when a marker names a field the row does not carry.
///
/// Fixed once when the template is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Abort with [`TemplateError::FieldNotFound`]
    #[default]
    Fail,
    /// Read the field as an empty string
    Empty,
}

impl MissingFieldPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Empty => "empty",
        }
    }

    /// Resolve `field` in `row` under this policy
    pub fn lookup<'a>(&self, row: &'a Row, field: &str) -> Result<&'a str> {
        match row.get(field) {
            Some(value) => Ok(value.as_str()),
            None => match self {
                Self::Fail => Err(TemplateError::FieldNotFound {
                    field: field.to_string(),
                }),
                Self::Empty => Ok(""),
            },
        }
    }
}

impl FromStr for MissingFieldPolicy {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "empty" => Ok(Self::Empty),
            _ => Err(TemplateError::load(format!(
                "unknown missing-field policy '{}', expected 'fail' or 'empty'",
                s
            ))),
        }
    }
}

/// Build a row from `(field, value)` pairs
pub fn row_from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Row
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_present_field() {
        let row = row_from_pairs([("name", "Widget")]);
        assert_eq!(MissingFieldPolicy::Fail.lookup(&row, "name").unwrap(), "Widget");
        assert_eq!(MissingFieldPolicy::Empty.lookup(&row, "name").unwrap(), "Widget");
    }

    #[test]
    fn test_lookup_missing_field() {
        let row = row_from_pairs([("name", "Widget")]);
        let err = MissingFieldPolicy::Fail.lookup(&row, "sku").unwrap_err();
        assert!(matches!(err, TemplateError::FieldNotFound { field } if field == "sku"));
        assert_eq!(MissingFieldPolicy::Empty.lookup(&row, "sku").unwrap(), "");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("empty".parse::<MissingFieldPolicy>().unwrap(), MissingFieldPolicy::Empty);
        assert_eq!("Fail".parse::<MissingFieldPolicy>().unwrap(), MissingFieldPolicy::Fail);
        assert!("skip".parse::<MissingFieldPolicy>().is_err());
    }

    #[test]
    fn test_policy_serialization() {
        assert_eq!(serde_json::to_string(&MissingFieldPolicy::Empty).unwrap(), "\"empty\"");
        assert_eq!(MissingFieldPolicy::default(), MissingFieldPolicy::Fail);
    }
}
