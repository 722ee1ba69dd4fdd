//! speak subcommand handler.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use mspeak_ast::{AudienceLevel, DomainContext, Expression};
use mspeak_engine::SpeechEngine;
use mspeak_session::ContextMemory;

use super::{print_error, print_result, OutputFormat};

/// Arguments for the speak subcommand
#[derive(Args, Debug)]
pub struct SpeakArgs {
    /// LaTeX expression to speak
    pub latex: String,

    /// Audience level: elementary, high-school, undergraduate, graduate, research
    #[arg(long, default_value = "undergraduate")]
    pub audience: AudienceLevel,

    /// Skip detection and use this domain (e.g. calculus, complex, topology)
    #[arg(long)]
    pub domain: Option<DomainContext>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print `[voice-role] speech` lines instead of bare speech
    #[arg(long, default_value_t = false)]
    pub transcript: bool,
}

pub fn run(engine: &SpeechEngine, args: &SpeakArgs) -> Result<ExitCode> {
    let expression = Expression::new(args.latex.as_str())
        .with_audience(args.audience)
        .with_domain_hint(args.domain);
    let mut memory = ContextMemory::new();
    let mut out = io::stdout().lock();

    match engine.process(&expression, &mut memory) {
        Ok(result) => {
            print_result(&mut out, &args.latex, &result, args.format, args.transcript)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => print_error(&mut out, &args.latex, &e, args.format),
    }
}
