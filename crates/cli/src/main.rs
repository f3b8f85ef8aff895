// entitycheck CLI - reconcile entity-schema validation reports

mod check;
mod exit_codes;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use check::AllowedArg;
use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "entitycheck")]
#[command(about = "Merge entity-schema validation reports into one verdict per property")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the reports listed in a .check.toml config
    #[command(after_help = "\
Examples:
  entitycheck check q42.check.toml
  entitycheck check q42.check.toml --json
  entitycheck check q42.check.toml --output result.json")]
    Check {
        /// Path to the .check.toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of the listing
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Reconcile report files given on the command line
    #[command(after_help = "\
Examples:
  entitycheck merge e10.json e20.json
  entitycheck merge payload.json --batch --json
  entitycheck merge e10.json e20.json --allowed distinct")]
    Merge {
        /// Validator report files, in the order schemas were selected
        #[arg(required = true)]
        reports: Vec<PathBuf>,

        /// Files are multi-schema payloads
        #[arg(long)]
        batch: bool,

        /// How `allowed` relates to `present`
        #[arg(long, value_enum, env = "ENTITYCHECK_ALLOWED")]
        allowed: Option<AllowedArg>,

        /// Output JSON to stdout instead of the listing
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a check config without running
    #[command(after_help = "\
Examples:
  entitycheck validate q42.check.toml")]
    Validate {
        /// Path to the .check.toml config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: entitycheck <command> [options]");
            eprintln!("       entitycheck --help for more information");
            Err(CliError::args(""))
        }
        Some(Commands::Check { config, json, output }) => check::cmd_check(config, json, output),
        Some(Commands::Merge { reports, batch, allowed, json, output }) => {
            check::cmd_merge(reports, batch, allowed, json, output)
        }
        Some(Commands::Validate { config }) => check::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }
}
