//! Configuration loading and parsing.
//!
//! Parses `dsviz.toml` (or an override path supplied by the binary),
//! extracting the capacity limits and the initial structure kind. Every field
//! is optional and unknown fields are ignored (TOML deserialization
//! tolerance) so the file format can evolve without breaking older files.
//! A missing file is not an error; it yields the defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

/// Default config file name discovered in the working directory.
pub const CONFIG_FILE_NAME: &str = "dsviz.toml";

/// Capacity limits for the session's bounded collections.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Token cap applied by the tokenizer (tokens past it are dropped).
    #[serde(default = "LimitsConfig::default_max_tokens")]
    pub max_tokens: usize,
    /// Undo snapshots retained before the oldest is evicted.
    #[serde(default = "LimitsConfig::default_history_cap")]
    pub history_cap: usize,
    /// Recent search queries retained.
    #[serde(default = "LimitsConfig::default_search_history_cap")]
    pub search_history_cap: usize,
}

impl LimitsConfig {
    fn default_max_tokens() -> usize {
        30
    }
    fn default_history_cap() -> usize {
        100
    }
    fn default_search_history_cap() -> usize {
        5
    }

    /// Limits with zero values clamped up to one; a zero cap would make the
    /// bounded collections unusable rather than small.
    pub fn clamped(self) -> Self {
        Self {
            max_tokens: self.max_tokens.max(1),
            history_cap: self.history_cap.max(1),
            search_history_cap: self.search_history_cap.max(1),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tokens: Self::default_max_tokens(),
            history_cap: Self::default_history_cap(),
            search_history_cap: Self::default_search_history_cap(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StructureConfig {
    /// Initial structure kind by name ("stack", "queue", "linkedlist",
    /// "tree"). Parsed by the state layer; an unknown name falls back there.
    #[serde(default = "StructureConfig::default_kind")]
    pub default: String,
}

impl StructureConfig {
    fn default_kind() -> String {
        "stack".to_owned()
    }
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            default: Self::default_kind(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub structure: StructureConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Original file text, retained for diagnostics (None when defaulted).
    pub raw: Option<String>,
    pub file: ConfigFile,
}

impl Config {
    pub fn limits(&self) -> LimitsConfig {
        self.file.limits.clamped()
    }

    pub fn default_structure(&self) -> &str {
        &self.file.structure.default
    }
}

/// Load configuration from `override_path`, or discover `dsviz.toml` in the
/// working directory. A missing file yields defaults; an unreadable or
/// unparsable file is an error the caller may downgrade to defaults.
pub fn load_from(override_path: Option<PathBuf>) -> Result<Config> {
    let (path, required) = match override_path {
        Some(p) => (p, true),
        None => (PathBuf::from(CONFIG_FILE_NAME), false),
    };

    if !path.exists() {
        if required {
            anyhow::bail!("config file not found: {}", path.display());
        }
        info!(target: "config", "no config file, using defaults");
        return Ok(Config::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&raw)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    info!(
        target: "config",
        file = %path.display(),
        max_tokens = file.limits.max_tokens,
        history_cap = file.limits.history_cap,
        "config_loaded"
    );
    Ok(Config {
        raw: Some(raw),
        file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_when_no_file() {
        let cfg = load_from(Some(PathBuf::from("/definitely/missing/dsviz.toml")));
        assert!(cfg.is_err());
        let cfg = Config::default();
        assert_eq!(cfg.limits().max_tokens, 30);
        assert_eq!(cfg.limits().history_cap, 100);
        assert_eq!(cfg.limits().search_history_cap, 5);
        assert_eq!(cfg.default_structure(), "stack");
    }

    #[test]
    fn parses_partial_file_with_defaults() {
        let f = write_config("[limits]\nmax_tokens = 12\n");
        let cfg = load_from(Some(f.path().to_path_buf())).unwrap();
        assert_eq!(cfg.limits().max_tokens, 12);
        assert_eq!(cfg.limits().history_cap, 100);
        assert!(cfg.raw.is_some());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let f = write_config("[limits]\nmax_tokens = 9\nfuture_knob = true\n[nope]\nx = 1\n");
        let cfg = load_from(Some(f.path().to_path_buf())).unwrap();
        assert_eq!(cfg.limits().max_tokens, 9);
    }

    #[test]
    fn zero_limits_clamp_to_one() {
        let f = write_config("[limits]\nmax_tokens = 0\nhistory_cap = 0\n");
        let cfg = load_from(Some(f.path().to_path_buf())).unwrap();
        assert_eq!(cfg.limits().max_tokens, 1);
        assert_eq!(cfg.limits().history_cap, 1);
    }

    #[test]
    fn structure_default_is_parsed() {
        let f = write_config("[structure]\ndefault = \"tree\"\n");
        let cfg = load_from(Some(f.path().to_path_buf())).unwrap();
        assert_eq!(cfg.default_structure(), "tree");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let f = write_config("[limits\nmax_tokens = ");
        assert!(load_from(Some(f.path().to_path_buf())).is_err());
    }
}
