//! batch subcommand handler.
//!
//! Reads one expression per line and speaks them in order through a single
//! session, so definitions and open structures carry from line to line.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use mspeak_ast::{AudienceLevel, DomainContext, Expression};
use mspeak_engine::SpeechEngine;
use mspeak_session::ContextMemory;

use super::{exit_code, print_error, print_result, OutputFormat};

/// Arguments for the batch subcommand
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// File with one LaTeX expression per line; `%` starts a comment line
    pub file: PathBuf,

    #[arg(long, default_value = "undergraduate")]
    pub audience: AudienceLevel,

    #[arg(long)]
    pub domain: Option<DomainContext>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, default_value_t = false)]
    pub transcript: bool,
}

/// Lines worth speaking: trimmed, non-empty, not comments.
pub fn expressions(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('%'))
}

/// Every line is processed even after a failure; the exit code is that of
/// the first failure.
pub fn run(engine: &SpeechEngine, args: &BatchArgs) -> Result<ExitCode> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let mut memory = ContextMemory::new();
    let mut out = io::stdout().lock();
    let mut first_failure: Option<u8> = None;
    let mut spoken = 0usize;

    for latex in expressions(&content) {
        let expression = Expression::new(latex)
            .with_audience(args.audience)
            .with_domain_hint(args.domain);
        match engine.process(&expression, &mut memory) {
            Ok(result) => {
                spoken += 1;
                print_result(&mut out, latex, &result, args.format, args.transcript)?;
            }
            Err(e) => {
                print_error(&mut out, latex, &e, args.format)?;
                first_failure.get_or_insert(exit_code(&e));
            }
        }
    }

    tracing::debug!(
        spoken,
        symbols = memory.symbol_count(),
        "batch finished"
    );
    Ok(first_failure.map_or(ExitCode::SUCCESS, ExitCode::from))
}
