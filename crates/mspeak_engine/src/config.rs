use std::path::PathBuf;
use std::time::Duration;

use mspeak_guard::{GuardConfig, DEFAULT_BUDGET};
use serde::{Deserialize, Serialize};

/// Engine configuration. Every section has defaults, so a partial TOML file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub guard: GuardConfig,
    pub cache: CacheSettings,
    /// Wall-clock budget for one call, guard entry to enhanced text.
    pub timeout_ms: u64,
    pub rewrite: RewriteLimits,
    /// Report single-letter symbols used without a definition in the session.
    pub warn_undefined_symbols: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            guard: GuardConfig::default(),
            cache: CacheSettings::default(),
            timeout_ms: DEFAULT_BUDGET.as_millis() as u64,
            rewrite: RewriteLimits::default(),
            warn_undefined_symbols: true,
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub capacity: usize,
    pub ttl_secs: u64,
    /// Snapshot loaded at start and saved at exit by front ends.
    pub snapshot_path: Option<PathBuf>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 4096,
            ttl_secs: 3600,
            snapshot_path: None,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Bounds on the rewrite loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteLimits {
    pub max_passes: usize,
    /// Output may grow to this multiple of the input (never below
    /// `MIN_OUTPUT_BUDGET` bytes).
    pub max_growth_factor: usize,
}

/// Smallest output budget, so short inputs can still expand into words.
pub const MIN_OUTPUT_BUDGET: usize = 4096;

impl Default for RewriteLimits {
    fn default() -> Self {
        Self {
            max_passes: 12,
            max_growth_factor: 8,
        }
    }
}

impl RewriteLimits {
    pub fn output_budget(&self, input_len: usize) -> usize {
        input_len
            .saturating_mul(self.max_growth_factor)
            .max(MIN_OUTPUT_BUDGET)
    }
}
