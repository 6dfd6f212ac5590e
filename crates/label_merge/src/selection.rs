//! Row selection

use std::fmt;
use std::str::FromStr;

use label_template::Row;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Restricts a run to rows whose `field` is non-empty, or equals `value`
/// when one is given. Rows that do not match consume no grid slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub field: String,
    pub value: Option<String>,
}

impl Selection {
    /// Select rows where `field` is non-empty
    pub fn non_empty(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: None,
        }
    }

    /// Select rows where `field` equals `value`
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: Some(value.into()),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        let actual = row.get(&self.field).map(String::as_str).unwrap_or_default();
        match &self.value {
            Some(expected) => actual == expected,
            None => !actual.is_empty(),
        }
    }

    /// Check the selected field against the data header
    pub fn check_columns(&self, headers: &[String]) -> Result<(), ConfigError> {
        if headers.iter().any(|h| *h == self.field) {
            Ok(())
        } else {
            Err(ConfigError::UnknownSelectionField(self.field.clone()))
        }
    }
}

impl FromStr for Selection {
    type Err = ConfigError;

    /// `field` or `field=value`; the value may be empty or contain `=`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = match s.split_once('=') {
            Some((field, value)) => (field, Some(value.to_string())),
            None => (s, None),
        };
        if field.is_empty() {
            return Err(ConfigError::InvalidSelection(s.to_string()));
        }
        Ok(Self {
            field: field.to_string(),
            value,
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.field, value),
            None => write!(f, "{}", self.field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use label_template::row_from_pairs;

    #[test]
    fn test_parse() {
        assert_eq!("ship".parse::<Selection>().unwrap(), Selection::non_empty("ship"));
        assert_eq!(
            "bin=A=1".parse::<Selection>().unwrap(),
            Selection::equals("bin", "A=1")
        );
        assert_eq!("bin=".parse::<Selection>().unwrap(), Selection::equals("bin", ""));
        assert!(matches!(
            "=x".parse::<Selection>(),
            Err(ConfigError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_matches() {
        let row = row_from_pairs([("ship", "yes"), ("note", "")]);
        assert!(Selection::non_empty("ship").matches(&row));
        assert!(!Selection::non_empty("note").matches(&row));
        assert!(Selection::equals("ship", "yes").matches(&row));
        assert!(!Selection::equals("ship", "no").matches(&row));
        assert!(Selection::equals("note", "").matches(&row));
    }

    #[test]
    fn test_check_columns() {
        let headers = vec!["ship".to_string()];
        assert!(Selection::non_empty("ship").check_columns(&headers).is_ok());
        assert!(matches!(
            Selection::non_empty("shelf").check_columns(&headers),
            Err(ConfigError::UnknownSelectionField(f)) if f == "shelf"
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Selection::equals("a", "b").to_string(), "a=b");
        assert_eq!(Selection::non_empty("a").to_string(), "a");
    }
}
