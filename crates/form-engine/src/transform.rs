// File: src/transform.rs
// Purpose: Value conversions applied by change handlers

use crate::value::FieldValue;

/// Leading-integer parse, as a browser's `parseInt(value, 10)`.
///
/// Skips leading whitespace, takes an optional sign and the digits that
/// follow, and ignores the rest. Yields `NaN` when no digit is found.
pub fn parse_int(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Number(n) => FieldValue::Number(n.trunc()),
        FieldValue::Text(s) => FieldValue::Number(leading_int(&s).unwrap_or(f64::NAN)),
        FieldValue::Bool(_) | FieldValue::Null => FieldValue::Number(f64::NAN),
    }
}

fn leading_int(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Parsing as f64 keeps very long digit runs from overflowing
    let magnitude: f64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Whole-text numeric parse. Blank text stays blank so `required` still sees it.
pub fn parse_number(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(s) if s.trim().is_empty() => FieldValue::Text(s),
        FieldValue::Text(s) => FieldValue::Number(s.trim().parse().unwrap_or(f64::NAN)),
        other => other,
    }
}

pub fn trim(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(s) => FieldValue::Text(s.trim().to_string()),
        other => other,
    }
}

/// Checkbox state from either a boolean or the `"on"`/`"true"` text forms.
pub fn checkbox(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(s) => FieldValue::Bool(matches!(s.as_str(), "on" | "true" | "checked")),
        FieldValue::Null => FieldValue::Bool(false),
        other => other,
    }
}
