// File: src/state.rs
// Purpose: Field values and validation errors owned by a form

use crate::key::FieldKey;
use crate::value::FieldValue;
use std::collections::HashMap;

/// Current values of a form, keyed by field.
///
/// Partial: a field is absent until it is initialized or changed.
#[derive(Debug, Clone, PartialEq)]
pub struct FormData<K: FieldKey> {
    values: HashMap<K, FieldValue>,
}

impl<K: FieldKey> FormData<K> {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Replace one field, leaving every other field as it was.
    pub fn set(&mut self, key: K, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(key, value.into())
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: K, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &FieldValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: FieldKey> Default for FormData<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FieldKey, V: Into<FieldValue>> FromIterator<(K, V)> for FormData<K> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

/// The first failing rule's message for each invalid field.
///
/// A field with no entry passed every rule on the last submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMap<K: FieldKey> {
    errors: HashMap<K, String>,
}

impl<K: FieldKey> ErrorMap<K> {
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<&str> {
        self.errors.get(key).map(|s| s.as_str())
    }

    pub fn has_error(&self, key: &K) -> bool {
        self.errors.contains_key(key)
    }

    pub(crate) fn insert(&mut self, key: K, message: impl Into<String>) {
        self.errors.insert(key, message.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &str)> {
        self.errors.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<K: FieldKey> Default for ErrorMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Data and errors as observed right after a change or submit.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot<K: FieldKey> {
    pub data: FormData<K>,
    pub errors: ErrorMap<K>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_leaves_other_fields() {
        let mut data: FormData<String> = FormData::new()
            .with("name".to_string(), "John")
            .with("age".to_string(), 30);

        let previous = data.set("name".to_string(), "Jane");

        assert_eq!(previous, Some(FieldValue::from("John")));
        assert_eq!(data.get(&"name".to_string()), Some(&FieldValue::from("Jane")));
        assert_eq!(data.get(&"age".to_string()), Some(&FieldValue::from(30)));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_error_lookup() {
        let mut errors: ErrorMap<String> = ErrorMap::new();
        assert!(errors.is_empty());

        errors.insert("email".to_string(), "Invalid email format");

        assert!(errors.has_error(&"email".to_string()));
        assert_eq!(errors.get(&"email".to_string()), Some("Invalid email format"));
        assert!(errors.get(&"name".to_string()).is_none());
    }
}
