use crate::config::GuardConfig;
use crate::error::{BombReason, SecurityViolation};
use crate::sanitize::sanitize;
use crate::scan::{InputProfile, CARET_ESCAPE};

/// Input that passed every guard check, with presentational noise removed.
///
/// Only [`check`] constructs it, so holding a `SafeInput` means the limits of
/// the `GuardConfig` it was checked against hold for its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeInput {
    text: String,
    elided: Vec<String>,
    original_len: usize,
    max_depth: usize,
}

impl SafeInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Denylisted commands removed under the elide policy.
    pub fn elided(&self) -> &[String] {
        &self.elided
    }

    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Depth limit the input was checked against; the parser enforces it too.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Validates raw input. Checks run in a fixed order and the first failure is
/// returned: empty, length, dangerous constructs, depth, expansion bombs,
/// brace balance.
pub fn check(raw: &str, config: &GuardConfig) -> Result<SafeInput, SecurityViolation> {
    if raw.trim().is_empty() {
        return Err(SecurityViolation::EmptyInput);
    }
    if raw.len() > config.max_length {
        return Err(SecurityViolation::TooLong {
            len: raw.len(),
            max: config.max_length,
        });
    }

    let profile = InputProfile::scan(raw);

    if let Some(command) = &profile.dangerous {
        // `^^` cannot be elided without guessing what it decodes to.
        if config.reject_dangerous || command == CARET_ESCAPE {
            tracing::warn!(command = %command, "rejected dangerous construct");
            return Err(SecurityViolation::DangerousConstruct {
                command: command.clone(),
            });
        }
    }

    if profile.max_depth > config.max_depth {
        return Err(SecurityViolation::TooDeeplyNested {
            depth: profile.max_depth,
            max: config.max_depth,
        });
    }

    if let Some(reason) = bomb_reason(&profile, config) {
        tracing::warn!(%reason, "suspected expansion bomb");
        return Err(SecurityViolation::ExpansionBombSuspected { reason });
    }

    if profile.brace_imbalance() > config.brace_tolerance {
        return Err(SecurityViolation::MalformedInput {
            open: profile.open_braces,
            close: profile.close_braces,
        });
    }

    let (text, elided) = sanitize(raw, !config.reject_dangerous);
    if text.is_empty() {
        return Err(SecurityViolation::EmptyInput);
    }
    tracing::debug!(
        len = raw.len(),
        sanitized_len = text.len(),
        depth = profile.max_depth,
        elided = elided.len(),
        "input accepted"
    );

    Ok(SafeInput {
        text,
        elided,
        original_len: raw.len(),
        max_depth: config.max_depth,
    })
}

fn bomb_reason(profile: &InputProfile, config: &GuardConfig) -> Option<BombReason> {
    if let Some((command, count)) = &profile.top_risky {
        if *count > config.max_risky_commands {
            return Some(BombReason::RiskyCommandCount {
                command: command.clone(),
                count: *count,
            });
        }
    }
    if profile.nested_risky_streak > config.max_nested_risky {
        return Some(BombReason::NestedRiskyCommands {
            streak: profile.nested_risky_streak,
        });
    }
    if profile.scripts > config.max_scripts {
        return Some(BombReason::ScriptCount {
            scripts: profile.scripts,
        });
    }
    if profile.scripts >= config.min_scripts_for_density
        && profile.script_density() > config.max_script_density
    {
        return Some(BombReason::ScriptDensity {
            scripts: profile.scripts,
            chars: profile.non_space_chars,
        });
    }
    if let Some((ch, run)) = profile.longest_char_run {
        if run > config.max_char_run {
            return Some(BombReason::RepeatedCharacter { ch, run });
        }
    }
    if let Some((command, run)) = &profile.longest_command_run {
        if *run > config.max_command_run {
            return Some(BombReason::RepeatedCommand {
                command: command.clone(),
                run: *run,
            });
        }
    }
    None
}
