//! Configuration types for lognav.
//!
//! [`Config::load`] reads `~/.config/lognav/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[timestamps]
fields   = ["timestamp", "ts", "time", "@timestamp", "date"]
patterns = [
    '^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}',
    '^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}',
    '^[A-Z][a-z]{2}, \d{1,2} [A-Z][a-z]{2} \d{4}',
    '^\d{4}-\d{2}-\d{2}$',
]

[sampling]
cap    = 1000
target = 100

[ingest]
parse_timeout_ms = 0
"#;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A configuration value the core cannot work with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid timestamp pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("sampling.cap must be at least 1")]
    ZeroCap,
    #[error("sampling.target must be between 1 and sampling.cap ({cap}), got {target}")]
    TargetOutOfRange { cap: usize, target: usize },
}

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/lognav/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timestamps: TimestampConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// `[timestamps]` section: where to look for a record's time and how to
/// recognise calendar text.
#[derive(Debug, Clone, Deserialize)]
pub struct TimestampConfig {
    /// Dotted field paths, tried in order.
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
    /// Regexes a non-numeric candidate must match before calendar parsing.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

fn default_fields() -> Vec<String> {
    ["timestamp", "ts", "time", "@timestamp", "date"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_patterns() -> Vec<String> {
    [
        r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}",
        r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}",
        r"^[A-Z][a-z]{2}, \d{1,2} [A-Z][a-z]{2} \d{4}",
        r"^\d{4}-\d{2}-\d{2}$",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            patterns: default_patterns(),
        }
    }
}

/// `[sampling]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SamplingConfig {
    /// Files at or below this many entries are never thinned.
    #[serde(default = "default_cap")]
    pub cap: usize,
    /// Approximate number of points kept once a file exceeds `cap`.
    #[serde(default = "default_target")]
    pub target: usize,
}

fn default_cap() -> usize { 1000 }
fn default_target() -> usize { 100 }

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            cap: default_cap(),
            target: default_target(),
        }
    }
}

/// `[ingest]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct IngestConfig {
    /// Per-file parse timeout in milliseconds; 0 disables it.
    #[serde(default)]
    pub parse_timeout_ms: u64,
}

impl IngestConfig {
    pub fn parse_timeout(&self) -> Option<std::time::Duration> {
        (self.parse_timeout_ms > 0).then(|| std::time::Duration::from_millis(self.parse_timeout_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/lognav/config.toml`, layered on top of the
    /// built-in defaults, then `extra` if given. Creates the user file with
    /// defaults if it does not exist.
    pub fn load(extra: Option<&Path>) -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false));
        if let Some(extra) = extra {
            builder = builder.add_source(config::File::from(extra).required(true));
        }

        let cfg: Config = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Layer a TOML string over the built-in defaults. Does not touch the
    /// filesystem.
    pub fn from_toml(toml: &str) -> anyhow::Result<Self> {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::timestamp::TimestampExtractor::from_config(&self.timestamps)?;
        let SamplingConfig { cap, target } = self.sampling;
        if cap == 0 {
            return Err(ConfigError::ZeroCap);
        }
        if target == 0 || target > cap {
            return Err(ConfigError::TargetOutOfRange { cap, target });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("lognav")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
