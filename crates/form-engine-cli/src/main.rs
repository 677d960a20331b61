mod commands;
mod registration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use registration::RegistrationInput;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "registration")]
#[command(version, about = "Registration form demo for form-engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the registration form and submit it
    Submit {
        #[command(flatten)]
        input: RegistrationInput,

        /// Submit through the plain form, which has no rules
        #[arg(long, conflicts_with = "rules")]
        plain: bool,

        /// Load the rules from a TOML file instead of the built-in set
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that a rules file compiles against the registration form
    #[command(name = "check-rules")]
    CheckRules {
        /// Path to the rules file
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Submit {
            input,
            plain,
            rules,
            json,
        } => commands::submit::execute(&input, plain, rules.as_deref(), json),
        Commands::CheckRules { path } => {
            commands::check::execute(&path)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
