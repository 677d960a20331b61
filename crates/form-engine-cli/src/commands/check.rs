use crate::registration::{registry, UserField};
use anyhow::{Context, Result};
use colored::Colorize;
use form_engine::{FieldKey, RulesFile};
use std::path::Path;

pub fn execute(path: &Path) -> Result<()> {
    let rules = RulesFile::load_from(path)
        .with_context(|| format!("Failed to load rules from {}", path.display()))?;
    let config = rules
        .engine_config::<UserField>(&registry())
        .with_context(|| format!("Invalid rules in {}", path.display()))?;

    println!("{} {}", "✓ Rules compiled:".green().bold(), path.display());
    for key in UserField::ALL {
        let Some(rule) = config.validations.get(key) else {
            println!("  {:<10} {}", key.name().cyan(), "no rules".dimmed());
            continue;
        };

        let mut checks = Vec::new();
        if rule.required.as_ref().map_or(false, |r| r.value) {
            checks.push("required".to_string());
        }
        if let Some(pattern) = &rule.pattern {
            checks.push(format!("pattern {}", pattern.value));
        }
        if rule.custom.is_some() {
            checks.push("custom".to_string());
        }
        println!("  {:<10} {}", key.name().cyan(), checks.join(", "));
    }

    if !config.initial_values.is_empty() {
        println!("  initial values for {} field(s)", config.initial_values.len());
    }

    Ok(())
}
