// File: src/pattern.rs
// Purpose: Compiled regular-expression rules

use crate::error::{ConfigError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// `/body/flags` delimiter syntax
static DELIMITED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^/(.*)/([a-z]*)$").unwrap());

/// A regular expression compiled once, when the rule set is built.
///
/// Sources are accepted bare (`^[a-z]+$`) or in delimiter syntax
/// (`/[A-Za-z]*/i`). Delimiter flags `i`, `m` and `s` become inline flags;
/// `g`, `u` and `y` have no meaning for a single match and are ignored.
///
/// A value matches only when the expression covers its entire string form,
/// so `/[A-Za-z]*/` accepts `"Felix"` and rejects `"Felix123"`.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();

        let (body, flags) = match DELIMITED.captures(&source) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            None => (source.as_str(), ""),
        };

        let mut inline = String::new();
        for flag in flags.chars() {
            match flag {
                'i' | 'm' | 's' => {
                    if !inline.contains(flag) {
                        inline.push(flag);
                    }
                }
                'g' | 'u' | 'y' => {}
                other => {
                    return Err(ConfigError::UnsupportedFlag {
                        pattern: source.clone(),
                        flag: other,
                    })
                }
            }
        }

        let mut anchored = String::with_capacity(body.len() + inline.len() + 12);
        if !inline.is_empty() {
            anchored.push_str("(?");
            anchored.push_str(&inline);
            anchored.push(')');
        }
        anchored.push_str("^(?:");
        anchored.push_str(body);
        anchored.push_str(")$");

        let regex = Regex::new(&anchored).map_err(|error| ConfigError::InvalidPattern {
            pattern: source.clone(),
            error: Box::new(error),
        })?;

        Ok(Self { source, regex })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// The source text as written in the rule.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
