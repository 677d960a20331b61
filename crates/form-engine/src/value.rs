// File: src/value.rs
// Purpose: Scalar field values and their string form

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value held by one form field.
///
/// Serializes untagged, so it reads and writes plain JSON/TOML scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// True for an explicit null or an empty string.
    ///
    /// `NaN` and `false` are present values, not empty ones.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert a JSON scalar, `None` for arrays and objects.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(FieldValue::Null),
            serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number),
            serde_json::Value::String(s) => Some(FieldValue::Text(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

/// Field value absent from the form, or present but empty.
pub fn is_blank(value: Option<&FieldValue>) -> bool {
    value.map_or(true, FieldValue::is_empty)
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // f64's Display already prints 42.0 as "42" and NaN as "NaN"
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_form() {
        assert_eq!(FieldValue::from(42).to_string(), "42");
        assert_eq!(FieldValue::from(4.5).to_string(), "4.5");
        assert_eq!(FieldValue::Number(f64::NAN).to_string(), "NaN");
        assert_eq!(FieldValue::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(FieldValue::from(true).to_string(), "true");
        assert_eq!(FieldValue::from("Felix").to_string(), "Felix");
        assert_eq!(FieldValue::Null.to_string(), "null");
    }

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from(" ").is_empty());
        assert!(!FieldValue::from(false).is_empty());
        assert!(!FieldValue::Number(f64::NAN).is_empty());

        assert!(is_blank(None));
        assert!(!is_blank(Some(&FieldValue::from(0))));
    }

    #[test]
    fn test_json_scalars() {
        let value: FieldValue = serde_json::from_str("\"John\"").unwrap();
        assert_eq!(value, FieldValue::from("John"));

        let value: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, FieldValue::Null);

        assert_eq!(
            FieldValue::from_json(&serde_json::json!(7)),
            Some(FieldValue::Number(7.0))
        );
        assert_eq!(FieldValue::from_json(&serde_json::json!([1, 2])), None);
    }
}
