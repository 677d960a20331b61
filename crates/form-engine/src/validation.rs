// File: src/validation.rs
// Purpose: Per-field rules and the submit-time validation pass

use crate::key::FieldKey;
use crate::pattern::Pattern;
use crate::state::{ErrorMap, FormData};
use crate::value::{is_blank, FieldValue};
use std::fmt;
use std::rc::Rc;

/// Predicate behind a `custom` rule. Receives `None` for an untouched field.
pub type Predicate = Rc<dyn Fn(Option<&FieldValue>) -> bool>;

#[derive(Debug, Clone)]
pub struct Required {
    pub value: bool,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct PatternRule {
    pub value: Pattern,
    pub message: String,
}

#[derive(Clone)]
pub struct Custom {
    pub is_valid: Predicate,
    pub message: String,
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// The checks attached to one field.
///
/// Checks run in a fixed order, `required`, then `pattern`, then `custom`,
/// and the first failure decides the field's message.
#[derive(Debug, Clone, Default)]
pub struct ValidationRule {
    pub required: Option<Required>,
    pub pattern: Option<PatternRule>,
    pub custom: Option<Custom>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(Required {
            value: true,
            message: message.into(),
        });
        self
    }

    pub fn pattern(mut self, pattern: Pattern, message: impl Into<String>) -> Self {
        self.pattern = Some(PatternRule {
            value: pattern,
            message: message.into(),
        });
        self
    }

    pub fn custom<F>(mut self, is_valid: F, message: impl Into<String>) -> Self
    where
        F: Fn(Option<&FieldValue>) -> bool + 'static,
    {
        self.custom = Some(Custom {
            is_valid: Rc::new(is_valid),
            message: message.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_none() && self.pattern.is_none() && self.custom.is_none()
    }

    /// Message of the first failing check, `None` when the value passes.
    pub fn check(&self, value: Option<&FieldValue>) -> Option<&str> {
        if let Some(required) = &self.required {
            if required.value && is_blank(value) {
                return Some(required.message.as_str());
            }
        }

        if let Some(pattern) = &self.pattern {
            // An untouched field's string form is "undefined", as in the browser
            let text = value.map_or_else(|| "undefined".to_string(), |v| v.to_string());
            if !pattern.value.is_match(&text) {
                return Some(pattern.message.as_str());
            }
        }

        if let Some(custom) = &self.custom {
            if !(custom.is_valid)(value) {
                return Some(custom.message.as_str());
            }
        }

        None
    }
}

/// Rules for every validated field of a form.
///
/// Fields without an entry are always valid.
#[derive(Debug, Clone)]
pub struct ValidationConfig<K: FieldKey> {
    rules: Vec<(K, ValidationRule)>,
}

impl<K: FieldKey> ValidationConfig<K> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Attach `rule` to `key`, replacing any rule it already had.
    pub fn field(mut self, key: K, rule: ValidationRule) -> Self {
        self.insert(key, rule);
        self
    }

    pub fn insert(&mut self, key: K, rule: ValidationRule) {
        match self.rules.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = rule,
            None => self.rules.push((key, rule)),
        }
    }

    pub fn get(&self, key: &K) -> Option<&ValidationRule> {
        self.rules.iter().find(|(k, _)| k == key).map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &ValidationRule)> {
        self.rules.iter().map(|(k, rule)| (k, rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `data` and collect the failures.
    pub fn validate(&self, data: &FormData<K>) -> ErrorMap<K> {
        let mut errors = ErrorMap::new();

        for (key, rule) in &self.rules {
            if let Some(message) = rule.check(data.get(key)) {
                tracing::debug!(field = key.name(), error = message, "field failed validation");
                errors.insert(key.clone(), message);
            }
        }

        errors
    }
}

impl<K: FieldKey> Default for ValidationConfig<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn min_len(n: usize) -> impl Fn(Option<&FieldValue>) -> bool {
        move |value| value.and_then(FieldValue::as_str).map_or(false, |s| s.len() > n)
    }

    #[test]
    fn test_required_rejects_missing_null_and_empty() {
        let rule = ValidationRule::new().required("required");

        assert_eq!(rule.check(None), Some("required"));
        assert_eq!(rule.check(Some(&FieldValue::Null)), Some("required"));
        assert_eq!(rule.check(Some(&FieldValue::from(""))), Some("required"));
        assert_eq!(rule.check(Some(&FieldValue::from("x"))), None);
        assert_eq!(rule.check(Some(&FieldValue::from(0))), None);
    }

    #[test]
    fn test_required_false_is_inert() {
        let mut rule = ValidationRule::new();
        rule.required = Some(Required {
            value: false,
            message: "never".into(),
        });

        assert_eq!(rule.check(None), None);
    }

    #[test]
    fn test_pattern_uses_string_form() {
        let rule = ValidationRule::new().pattern(Pattern::new(r"\d+").unwrap(), "digits");

        assert_eq!(rule.check(Some(&FieldValue::from(42))), None);
        assert_eq!(rule.check(Some(&FieldValue::from("4a"))), Some("digits"));
        assert_eq!(rule.check(None), Some("digits"));
    }

    #[test]
    fn test_first_failure_wins() {
        let rule = ValidationRule::new()
            .required("required")
            .pattern(Pattern::new("/[A-Za-z]*/").unwrap(), "letters")
            .custom(min_len(6), "too short");

        assert_eq!(rule.check(None), Some("required"));
        assert_eq!(rule.check(Some(&FieldValue::from("123"))), Some("letters"));
        assert_eq!(rule.check(Some(&FieldValue::from("Felix"))), Some("too short"));
        assert_eq!(rule.check(Some(&FieldValue::from("Felixxx"))), None);
    }

    #[test]
    fn test_validate_collects_each_field() {
        let config = ValidationConfig::new()
            .field("name".to_string(), ValidationRule::new().required("name required"))
            .field("bio".to_string(), ValidationRule::new().custom(min_len(2), "bio short"));

        let data = FormData::new().with("bio".to_string(), "x");
        let errors = config.validate(&data);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(&"name".to_string()), Some("name required"));
        assert_eq!(errors.get(&"bio".to_string()), Some("bio short"));
    }

    #[test]
    fn test_insert_replaces_existing_rule() {
        let mut config = ValidationConfig::new();
        config.insert("name".to_string(), ValidationRule::new().required("first"));
        config.insert("name".to_string(), ValidationRule::new().required("second"));

        assert_eq!(config.len(), 1);
        let rule = config.get(&"name".to_string()).unwrap();
        assert_eq!(rule.check(None), Some("second"));
    }
}
