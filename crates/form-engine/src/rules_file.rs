// File: src/rules_file.rs
// Purpose: Declarative rule sets loaded from TOML

use crate::engine::EngineConfig;
use crate::error::{ConfigError, Result};
use crate::key::FieldKey;
use crate::pattern::Pattern;
use crate::state::FormData;
use crate::validation::{Custom, Predicate, Required, ValidationConfig, ValidationRule};
use crate::value::{is_blank, FieldValue};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::rc::Rc;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

/// A rule set as written in a rules file.
///
/// ```toml
/// [initial]
/// name = "John"
///
/// [fields.name.required]
/// message = "Name is required"
///
/// [fields.name.pattern]
/// value = "/[A-Za-z ]*/"
/// message = "Letters and spaces only"
///
/// [fields.email.custom]
/// validator = "email"
/// message = "Invalid email address"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesFile {
    /// Starting values, keyed by field name
    #[serde(default)]
    pub initial: BTreeMap<String, FieldValue>,

    /// Rules, keyed by field name
    #[serde(default)]
    pub fields: BTreeMap<String, FieldRules>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldRules {
    #[serde(default)]
    pub required: Option<RequiredEntry>,

    #[serde(default)]
    pub pattern: Option<PatternEntry>,

    #[serde(default)]
    pub custom: Option<CustomEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredEntry {
    #[serde(default = "default_true")]
    pub value: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternEntry {
    /// Pattern source, bare or in `/body/flags` form
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomEntry {
    /// Name of a validator registered in the [`ValidatorRegistry`]
    pub validator: String,
    pub message: String,
}

fn default_true() -> bool {
    true
}

impl RulesFile {
    /// Load a rules file from disk.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            origin: origin.clone(),
            error,
        })?;

        Self::parse(&content, &origin)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self> {
        let file: RulesFile = toml::from_str(content).map_err(|error| ConfigError::Parse {
            origin: origin.to_string(),
            error: Box::new(error),
        })?;

        tracing::debug!(
            origin,
            fields = file.fields.len(),
            initial = file.initial.len(),
            "rules file loaded"
        );
        Ok(file)
    }

    /// Compile the declared rules for the record with keys `K`.
    ///
    /// Every pattern is compiled here, so a malformed one fails now rather
    /// than on the first submission.
    pub fn validations<K: FieldKey>(
        &self,
        registry: &ValidatorRegistry,
    ) -> Result<ValidationConfig<K>> {
        let mut config = ValidationConfig::new();

        for (name, field_rules) in &self.fields {
            let key = K::from_name(name).ok_or_else(|| ConfigError::UnknownField(name.clone()))?;

            let mut rule = ValidationRule::new();
            if let Some(required) = &field_rules.required {
                rule.required = Some(Required {
                    value: required.value,
                    message: required.message.clone(),
                });
            }
            if let Some(pattern) = &field_rules.pattern {
                rule = rule.pattern(Pattern::new(pattern.value.clone())?, pattern.message.clone());
            }
            if let Some(custom) = &field_rules.custom {
                let is_valid = registry.get(&custom.validator).ok_or_else(|| {
                    ConfigError::UnknownValidator {
                        field: name.clone(),
                        validator: custom.validator.clone(),
                    }
                })?;
                rule.custom = Some(Custom {
                    is_valid,
                    message: custom.message.clone(),
                });
            }

            if rule.is_empty() {
                tracing::warn!(field = name.as_str(), "field declared without rules");
                continue;
            }
            config.insert(key, rule);
        }

        Ok(config)
    }

    pub fn initial_values<K: FieldKey>(&self) -> Result<FormData<K>> {
        self.initial
            .iter()
            .map(|(name, value)| {
                K::from_name(name)
                    .map(|key| (key, value.clone()))
                    .ok_or_else(|| ConfigError::UnknownField(name.clone()))
            })
            .collect()
    }

    /// Initial values and rules, ready for an `on_submit` callback.
    pub fn engine_config<K: FieldKey>(
        &self,
        registry: &ValidatorRegistry,
    ) -> Result<EngineConfig<K>> {
        Ok(EngineConfig::new()
            .initial_values(self.initial_values()?)
            .validations(self.validations(registry)?))
    }
}

/// Named predicates that rules files refer to from `custom` rules.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Predicate>,
}

impl ValidatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with `email`, `url` and `non_blank`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("email", |value| {
            value
                .map(|v| EMAIL_REGEX.is_match(&v.to_string()))
                .unwrap_or(false)
        });
        registry.register("url", |value| {
            value
                .map(|v| URL_REGEX.is_match(&v.to_string()))
                .unwrap_or(false)
        });
        registry.register("non_blank", |value| {
            !is_blank(value) && value.map_or(false, |v| !v.to_string().trim().is_empty())
        });
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(Option<&FieldValue>) -> bool + 'static,
    {
        self.validators.insert(name.into(), Rc::new(predicate));
        self
    }

    pub fn get(&self, name: &str) -> Option<Predicate> {
        self.validators.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.validators.keys().collect();
        names.sort();
        f.debug_struct("ValidatorRegistry")
            .field("validators", &names)
            .finish()
    }
}
