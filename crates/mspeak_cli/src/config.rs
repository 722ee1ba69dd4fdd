use std::fs;
use std::path::{Path, PathBuf};

use mspeak_engine::EngineConfig;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "mspeak.toml";

/// Load the engine configuration.
///
/// An explicit path wins, then `mspeak.toml` in the working directory, then
/// the built-in defaults. A file that cannot be read or parsed is reported
/// and ignored.
pub fn load(explicit: Option<&Path>) -> EngineConfig {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return EngineConfig::default();
            }
            path
        }
    };

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "configuration loaded");
                return config;
            }
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "error parsing config file, using defaults"
            ),
        },
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "error reading config file, using defaults"
        ),
    }
    EngineConfig::default()
}
