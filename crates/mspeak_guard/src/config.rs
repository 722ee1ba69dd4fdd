use serde::{Deserialize, Serialize};

/// Limits enforced before any parsing happens.
///
/// Every field has a default, so a partial `[guard]` table in a TOML file is
/// enough to override a single limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Maximum input length in bytes.
    pub max_length: usize,
    /// Maximum `{[(` nesting depth (also enforced by the parser).
    pub max_depth: usize,
    /// Reject denylisted commands (`true`) or elide them from the output.
    pub reject_dangerous: bool,
    /// Maximum occurrences of fraction-like commands.
    pub max_risky_commands: usize,
    /// Maximum streak of risky commands at strictly increasing depth.
    pub max_nested_risky: usize,
    /// Maximum number of `_` / `^` scripts.
    pub max_scripts: usize,
    /// Script density (scripts / non-space chars) limit, checked once
    /// `min_scripts_for_density` scripts are present.
    pub max_script_density: f64,
    pub min_scripts_for_density: usize,
    /// Longest allowed run of one repeated character.
    pub max_char_run: usize,
    /// Longest allowed back-to-back run of the same command.
    pub max_command_run: usize,
    /// Allowed difference between `{` and `}` counts.
    pub brace_tolerance: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_length: 10_000,
            max_depth: 48,
            reject_dangerous: true,
            max_risky_commands: 40,
            max_nested_risky: 6,
            max_scripts: 256,
            max_script_density: 0.4,
            min_scripts_for_density: 24,
            max_char_run: 64,
            max_command_run: 12,
            brace_tolerance: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: GuardConfig = toml::from_str("max_length = 500").unwrap();
        assert_eq!(cfg.max_length, 500);
        assert_eq!(cfg.max_depth, GuardConfig::default().max_depth);
        assert!(cfg.reject_dangerous);
    }
}
