//! rules subcommand handler: list the ordered rule set for a domain.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use mspeak_ast::DomainContext;
use mspeak_engine::SpeechEngine;

use super::OutputFormat;
use crate::json_types::RuleJson;

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Domain whose rule set to list
    #[arg(long, default_value = "general")]
    pub domain: DomainContext,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(engine: &SpeechEngine, args: &RulesArgs) -> Result<()> {
    let ordered = engine.repository().ordered_for(args.domain);
    let mut out = io::stdout().lock();

    match args.format {
        OutputFormat::Json => {
            let rules: Vec<RuleJson> = ordered
                .iter()
                .map(|p| RuleJson {
                    id: p.id.clone(),
                    domain: p.domain.to_string(),
                    priority: p.priority.0,
                    tier: p.priority.tier().as_str().to_string(),
                    description: p.description.clone(),
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&rules)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{} rules for {}", ordered.len(), args.domain)?;
            for p in ordered.iter() {
                writeln!(out, "{:>5}  {:<40} {}", p.priority.0, p.id, p.description)?;
            }
        }
    }
    Ok(())
}
