use crate::registration::{Outcome, Registration, RegistrationInput, Variant};
use anyhow::Result;
use colored::Colorize;
use form_engine::FieldKey;
use serde_json::json;
use std::path::Path;
use std::process::ExitCode;

pub fn execute(
    input: &RegistrationInput,
    plain: bool,
    rules: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let form = match (plain, rules) {
        (true, _) => Registration::plain(),
        (false, Some(path)) => Registration::from_rules_file(path)?,
        (false, None) => Registration::validated()?,
    };
    tracing::debug!(variant = ?form.variant(), "registration form ready");

    form.fill(input);
    let outcome = form.submit();

    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(&outcome))?);
    } else {
        print_outcome(form.variant(), &outcome);
    }

    Ok(match outcome {
        Outcome::Submitted(_) => ExitCode::SUCCESS,
        Outcome::Rejected(_) => ExitCode::FAILURE,
    })
}

fn to_json(outcome: &Outcome) -> serde_json::Value {
    match outcome {
        Outcome::Submitted(user) => json!({ "submitted": true, "user": user }),
        Outcome::Rejected(failures) => {
            let errors: serde_json::Map<String, serde_json::Value> = failures
                .iter()
                .map(|(field, message)| (field.name().to_string(), json!(message)))
                .collect();
            json!({ "submitted": false, "errors": errors })
        }
    }
}

fn print_outcome(variant: Variant, outcome: &Outcome) {
    let label = match variant {
        Variant::Plain => "plain",
        Variant::Validated => "validated",
    };

    match outcome {
        Outcome::Submitted(_) => {
            println!(
                "{} {}",
                "✓ User submitted successfully!".green().bold(),
                format!("({label} form)").dimmed()
            );
        }
        Outcome::Rejected(failures) => {
            println!("{}", "✗ Registration was not submitted".red().bold());
            for (field, message) in failures {
                println!("  {:<10} {}", field.name().cyan(), message);
            }
        }
    }
}
