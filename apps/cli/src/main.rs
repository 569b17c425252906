//! # CNPJ Command-Line Front End
//!
//! Validates, formats, inspects and generates CNPJs from the terminal.
//!
//! ## Usage
//! ```bash
//! cnpj validate 11.222.333/0001-81
//! cnpj validate --verbose 12.ABC.34S/0001-11
//! cnpj format 11222333000181
//! cnpj info 11.222.333/0002-62
//! cnpj generate --count 5 --root ABCDE123
//! cnpj --numeric generate --unformatted
//! cnpj --json batch cnpjs.txt
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Load configuration from environment, apply flag overrides
//! 3. Initialize tracing (stderr, so stdout stays machine readable)
//! 4. Run the command, map its result to an exit code

mod commands;
mod config;
mod error;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cnpj_core::{Alphabet, Validator};

use crate::commands::Context;
use crate::config::{CliConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "cnpj")]
#[command(about = "Validate, format and generate Brazilian CNPJs (numeric and 2026 alphanumeric)")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Use the legacy digit-only alphabet
    #[arg(long, global = true)]
    numeric: bool,

    /// Skip the AA.AAA.AAA/NNNN-DD layout check
    #[arg(long, global = true)]
    no_format_check: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a CNPJ
    Validate {
        cnpj: String,
        /// Show warnings, canonical form and parts
        #[arg(long, short = 'v')]
        verbose: bool,
    },
    /// Format a CNPJ as AA.AAA.AAA/NNNN-DD
    Format { cnpj: String },
    /// Show the parts of a valid CNPJ
    Info { cnpj: String },
    /// Generate valid head-office CNPJs
    Generate {
        /// How many to generate
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
        /// Root to use (padded/truncated to 8 characters)
        #[arg(long, short = 'r')]
        root: Option<String>,
        /// Print the 14-character canonical form
        #[arg(long, short = 'u')]
        unformatted: bool,
    },
    /// Validate one CNPJ per line of a file
    Batch { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load() {
        Ok(config) => apply_flags(config, &cli),
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(?config, "configuration loaded");

    match run(&cli.command, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            tracing::error!(%err, "command failed");
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn apply_flags(mut config: CliConfig, cli: &Cli) -> CliConfig {
    if cli.json {
        config.output = OutputFormat::Json;
    }
    if cli.numeric {
        config.alphabet = Alphabet::Numeric;
    }
    if cli.no_format_check {
        config.check_format = false;
    }
    config
}

fn run(command: &Command, config: &CliConfig) -> anyhow::Result<bool> {
    let ctx = Context {
        validator: Validator::new(config.alphabet).with_format_check(config.check_format),
        output: config.output,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ok = match command {
        Command::Validate { cnpj, verbose } => commands::validate(&ctx, &mut out, cnpj, *verbose)?,
        Command::Format { cnpj } => commands::format(&ctx, &mut out, cnpj)?,
        Command::Info { cnpj } => commands::info(&ctx, &mut out, cnpj)?,
        Command::Generate {
            count,
            root,
            unformatted,
        } => {
            let mut rng = rand::thread_rng();
            commands::generate(&ctx, &mut out, &mut rng, *count, root.as_deref(), *unformatted)?;
            true
        }
        Command::Batch { file } => {
            let summary = commands::batch(&ctx, &mut out, file)?;
            summary.invalid == 0
        }
    };

    out.flush()?;
    Ok(ok)
}
