//! Interactive session.
//!
//! Every line is spoken through the same [`ContextMemory`], so a `let` on one
//! line is known on the next. Lines starting with `:` are session commands.

use anyhow::Result;
use clap::Args;
use mspeak_ast::{AudienceLevel, DomainContext, Expression};
use mspeak_engine::{SpeechEngine, SpeechSynthesizer, TranscriptSynthesizer};
use mspeak_session::ContextMemory;
use rustyline::error::ReadlineError;

#[derive(Args, Debug)]
pub struct ReplArgs {
    #[arg(long, default_value = "undergraduate")]
    pub audience: AudienceLevel,

    #[arg(long)]
    pub domain: Option<DomainContext>,
}

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Reset,
    Memory,
    Stats,
    Help,
    Unknown(&'a str),
    Speak(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    match line {
        ":quit" | ":q" | "quit" | "exit" => Input::Quit,
        ":reset" => Input::Reset,
        ":memory" => Input::Memory,
        ":stats" => Input::Stats,
        ":help" => Input::Help,
        other if other.starts_with(':') => Input::Unknown(other),
        other => Input::Speak(other),
    }
}

const HELP: &str = "\
:memory  show defined symbols and open structures
:stats   show cache statistics
:reset   forget definitions and structures
:quit    leave";

pub fn run(engine: &SpeechEngine, args: &ReplArgs) -> Result<()> {
    let mut rl = rustyline::DefaultEditor::new()?;
    let mut memory = ContextMemory::new();
    let mut stdout = std::io::stdout();

    println!("mspeak {} (:help for commands)", env!("CARGO_PKG_VERSION"));

    loop {
        match rl.readline("mspeak> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                match classify(line) {
                    Input::Quit => break,
                    Input::Reset => {
                        memory.reset();
                        println!("session cleared");
                    }
                    Input::Memory => print_memory(&memory),
                    Input::Stats => match engine.cache_stats() {
                        Some(s) => println!(
                            "{} entries, {} hits, {} misses ({:.0}% hit rate)",
                            s.entries,
                            s.hits,
                            s.misses,
                            s.hit_rate() * 100.0
                        ),
                        None => println!("cache disabled"),
                    },
                    Input::Help => println!("{}", HELP),
                    Input::Unknown(cmd) => println!("unknown command {} (:help)", cmd),
                    Input::Speak(latex) => {
                        let expression = Expression::new(latex)
                            .with_audience(args.audience)
                            .with_domain_hint(args.domain);
                        match engine.process(&expression, &mut memory) {
                            Ok(result) => {
                                TranscriptSynthesizer.speak(
                                    &result.speech,
                                    result.voice_role,
                                    &mut stdout,
                                )?;
                                for w in result.warnings.iter().filter(|w| w.is_warning()) {
                                    println!("  warning: {}", w.message);
                                }
                            }
                            Err(e) => {
                                println!("error: {}", e);
                                println!("  {}", e.remediation());
                            }
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                tracing::error!(error = ?err, "readline failed");
                break;
            }
        }
    }
    Ok(())
}

fn print_memory(memory: &ContextMemory) {
    if let Some(topic) = memory.current_topic() {
        println!("topic: {}", topic);
    }
    for (name, entry) in memory.symbols() {
        println!(
            "  {} = {} (used {} times)",
            name, entry.meaning, entry.ref_count
        );
    }
    for frame in memory.structures() {
        println!("  [{}] {:?}", frame.kind.as_str(), frame.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_lines_are_commands() {
        assert_eq!(classify(":reset"), Input::Reset);
        assert_eq!(classify(":q"), Input::Quit);
        assert_eq!(classify(":frob"), Input::Unknown(":frob"));
        assert_eq!(classify(r"\frac{1}{2}"), Input::Speak(r"\frac{1}{2}"));
    }
}
