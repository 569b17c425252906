//! # Commands
//!
//! One function per subcommand. Every command writes to a caller-supplied
//! writer so it can be exercised without a terminal.
//!
//! ## Exit Status
//! ```text
//! validate / format / info   Ok(true)  → exit 0
//!                            Ok(false) → exit 1 (input rejected)
//! batch                      exit 1 when any line is invalid
//! any command                Err(_)    → exit 2 (I/O, config)
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use rand::Rng;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use cnpj_core::{EstablishmentKind, IdentifierParts, ValidationOutcome, Validator};

use crate::config::OutputFormat;
use crate::error::{CliError, CliResult};

/// What every command needs: the configured validator and the output format.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub validator: Validator,
    pub output: OutputFormat,
}

impl Context {
    fn emit_json<W: Write, T: Serialize>(&self, out: &mut W, value: &T) -> CliResult<()> {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
        Ok(())
    }
}

// =============================================================================
// validate
// =============================================================================

pub fn validate<W: Write>(ctx: &Context, out: &mut W, cnpj: &str, verbose: bool) -> CliResult<bool> {
    let outcome = ctx.validator.validate(cnpj);
    debug!(valid = outcome.valid, "validate command");

    match ctx.output {
        OutputFormat::Json if verbose => ctx.emit_json(out, &outcome)?,
        OutputFormat::Json => ctx.emit_json(
            out,
            &json!({
                "valid": outcome.valid,
                "cnpj": display_form(cnpj, &outcome),
                "errors": outcome.error_messages(),
            }),
        )?,
        OutputFormat::Text => write_outcome(out, cnpj, &outcome, verbose)?,
    }

    Ok(outcome.valid)
}

fn display_form<'a>(input: &'a str, outcome: &'a ValidationOutcome) -> &'a str {
    if outcome.formatted.is_empty() {
        input
    } else {
        &outcome.formatted
    }
}

fn write_outcome<W: Write>(
    out: &mut W,
    input: &str,
    outcome: &ValidationOutcome,
    verbose: bool,
) -> CliResult<()> {
    let shown = display_form(input, outcome);
    if outcome.valid {
        writeln!(out, "✓ {shown} is valid")?;
    } else {
        writeln!(out, "✗ {shown} is invalid")?;
    }
    for reason in &outcome.errors {
        writeln!(out, "  - {reason}")?;
    }

    if verbose {
        for warning in &outcome.warnings {
            writeln!(out, "  ! {warning}")?;
        }
        writeln!(out, "  canonical:  {}", outcome.canonical)?;
        writeln!(out, "  alphabet:   {}", outcome.alphabet)?;
        if let Some(parts) = &outcome.parts {
            write_parts(out, parts)?;
        }
    }
    Ok(())
}

// =============================================================================
// format / info
// =============================================================================

pub fn format<W: Write>(ctx: &Context, out: &mut W, cnpj: &str) -> CliResult<bool> {
    let formatted = ctx.validator.format(cnpj);
    let ok = !formatted.is_empty();

    match ctx.output {
        OutputFormat::Json => ctx.emit_json(out, &json!({ "formatted": formatted }))?,
        OutputFormat::Text if ok => writeln!(out, "{formatted}")?,
        OutputFormat::Text => writeln!(out, "✗ cannot format '{cnpj}'")?,
    }
    Ok(ok)
}

pub fn info<W: Write>(ctx: &Context, out: &mut W, cnpj: &str) -> CliResult<bool> {
    let outcome = ctx.validator.validate(cnpj);
    let parts = if outcome.valid { outcome.parts.as_ref() } else { None };

    match (ctx.output, parts) {
        (OutputFormat::Json, Some(parts)) => ctx.emit_json(
            out,
            &json!({
                "valid": true,
                "cnpj_formatted": outcome.formatted,
                "cnpj_clean": outcome.canonical,
                "parts": parts,
            }),
        )?,
        (OutputFormat::Json, None) => ctx.emit_json(
            out,
            &json!({ "valid": false, "errors": outcome.error_messages() }),
        )?,
        (OutputFormat::Text, Some(parts)) => {
            writeln!(out, "{}", outcome.formatted)?;
            write_parts(out, parts)?;
        }
        (OutputFormat::Text, None) => write_outcome(out, cnpj, &outcome, false)?,
    }
    Ok(parts.is_some())
}

fn write_parts<W: Write>(out: &mut W, parts: &IdentifierParts) -> CliResult<()> {
    writeln!(out, "  root:       {}", parts.root)?;
    writeln!(out, "  order:      {}", parts.order)?;
    writeln!(out, "  checksum:   {}", parts.checksum)?;
    writeln!(out, "  kind:       {}", establishment_label(parts))?;
    writeln!(out, "  generation: {:?}", parts.generation)?;
    Ok(())
}

fn establishment_label(parts: &IdentifierParts) -> String {
    match parts.establishment {
        EstablishmentKind::HeadOffice => "head office (matriz)".to_string(),
        EstablishmentKind::Branch { number } => format!("branch #{number} (filial)"),
        EstablishmentKind::Invalid => "invalid".to_string(),
    }
}

// =============================================================================
// generate
// =============================================================================

pub fn generate<W: Write, R: Rng + ?Sized>(
    ctx: &Context,
    out: &mut W,
    rng: &mut R,
    count: usize,
    root: Option<&str>,
    unformatted: bool,
) -> CliResult<()> {
    let generated: Vec<String> = ctx
        .validator
        .generate_many(rng, count, root)
        .into_iter()
        .map(|cnpj| {
            if unformatted {
                ctx.validator.clean(&cnpj)
            } else {
                cnpj
            }
        })
        .collect();
    tracing::info!(count = generated.len(), alphabet = %ctx.validator.alphabet(), "generated identifiers");

    match ctx.output {
        OutputFormat::Json => ctx.emit_json(out, &generated)?,
        OutputFormat::Text => {
            for cnpj in &generated {
                writeln!(out, "{cnpj}")?;
            }
        }
    }
    Ok(())
}

// =============================================================================
// batch
// =============================================================================

/// Totals of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

/// Validates every non-blank line of the file at `path`.
pub fn batch<W: Write>(ctx: &Context, out: &mut W, path: &Path) -> CliResult<BatchSummary> {
    let file = File::open(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "validating batch file");

    batch_lines(ctx, out, BufReader::new(file))
}

/// Validates every non-blank line of `reader`.
pub fn batch_lines<W: Write, B: BufRead>(
    ctx: &Context,
    out: &mut W,
    reader: B,
) -> CliResult<BatchSummary> {
    let mut summary = BatchSummary::default();
    let mut outcomes = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(CliError::ReadInput)?;
        let cnpj = line.trim();
        if cnpj.is_empty() {
            continue;
        }

        let outcome = ctx.validator.validate(cnpj);
        summary.total += 1;
        if outcome.valid {
            summary.valid += 1;
        } else {
            summary.invalid += 1;
        }

        match ctx.output {
            OutputFormat::Json => outcomes.push(json!({
                "cnpj": cnpj,
                "valid": outcome.valid,
                "errors": outcome.error_messages(),
            })),
            OutputFormat::Text => write_outcome(out, cnpj, &outcome, false)?,
        }
    }

    match ctx.output {
        OutputFormat::Json => ctx.emit_json(
            out,
            &json!({ "results": outcomes, "summary": summary }),
        )?,
        OutputFormat::Text => writeln!(
            out,
            "\nTotal: {} | Valid: {} | Invalid: {}",
            summary.total, summary.valid, summary.invalid
        )?,
    }

    Ok(summary)
}

// =============================================================================
// Unit Tests
// =============================================================================
