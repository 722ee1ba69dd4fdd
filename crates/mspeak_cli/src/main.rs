use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mspeak_engine::SpeechEngine;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod json_types;
mod repl;

use commands::batch::BatchArgs;
use commands::rules::RulesArgs;
use commands::speak::SpeakArgs;
use repl::ReplArgs;

/// Turn LaTeX mathematics into natural spoken English
#[derive(Parser, Debug)]
#[command(name = "mspeak", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to ./mspeak.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Load the result cache from this file at start and save it on exit
    #[arg(long, global = true)]
    cache_file: Option<PathBuf>,

    /// Disable the result cache
    #[arg(long, global = true, default_value_t = false)]
    no_cache: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Speak a single expression
    Speak(SpeakArgs),
    /// Speak every line of a file through one session
    Batch(BatchArgs),
    /// Interactive session
    Repl(ReplArgs),
    /// List the rules applied for a domain, in application order
    Rules(RulesArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = config::load(cli.config.as_deref());
    if cli.no_cache {
        config.cache.enabled = false;
    }
    let snapshot = cli.cache_file.or_else(|| config.cache.snapshot_path.clone());

    let engine = SpeechEngine::new(config).context("building the rule repository")?;

    if let Some(path) = snapshot.as_deref().filter(|p| p.exists()) {
        match engine.load_cache(path) {
            Ok(n) => tracing::info!(entries = n, path = %path.display(), "cache snapshot loaded"),
            Err(e) => tracing::warn!(error = %e, path = %path.display(), "ignoring cache snapshot"),
        }
    }

    let code = match &cli.command {
        Command::Speak(args) => commands::speak::run(&engine, args)?,
        Command::Batch(args) => commands::batch::run(&engine, args)?,
        Command::Repl(args) => {
            repl::run(&engine, args)?;
            ExitCode::SUCCESS
        }
        Command::Rules(args) => {
            commands::rules::run(&engine, args)?;
            ExitCode::SUCCESS
        }
    };

    if let Some(path) = snapshot.as_deref() {
        match engine.save_cache(path) {
            Ok(n) => tracing::info!(entries = n, path = %path.display(), "cache snapshot saved"),
            Err(e) => tracing::warn!(error = %e, path = %path.display(), "cache snapshot not saved"),
        }
    }

    Ok(code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
