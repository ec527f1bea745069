mod commands;
mod document;
mod logging;

use clap::{Parser, Subcommand};
use logging::{init_logging, LoggingConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "formguard")]
#[command(about = "Check form values against a formguard schema")]
struct Cli {
    /// Log every validation result
    #[arg(long, global = true)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a value document against a form schema
    Check {
        /// Form schema (JSON, or YAML with a .yaml/.yml extension)
        #[arg(long, short)]
        schema: PathBuf,

        /// JSON object mapping selectors to values
        #[arg(long, short)]
        values: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in validators
    Validators {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = if cli.debug {
        LoggingConfig::debug()
    } else {
        LoggingConfig::default()
    };
    init_logging(&config.with_json(cli.json_logs))?;

    match cli.command {
        Commands::Check { schema, values, json } => {
            let valid = commands::check::run(&schema, &values, json, cli.debug)?;
            Ok(if valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Validators { json } => {
            commands::validators::run(json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
