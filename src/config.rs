//! Engine configuration.
//!
//! Stored as a machine-readable TOML file under the portmatch workspace
//! root. Every knob has a default, so a missing file or missing section
//! behaves identically to a fully spelled-out one.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub recommendations: RecommendationSettings,
}

/// Matching-pass knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingSettings {
    /// Candidate rows fetched per requested result, before threshold
    /// filtering trims the batch.
    #[serde(default = "default_fetch_multiplier")]
    pub candidate_fetch_multiplier: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            candidate_fetch_multiplier: default_fetch_multiplier(),
        }
    }
}

const fn default_fetch_multiplier() -> usize {
    2
}

/// Lifecycle windows for proactive recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_trend_ttl_days")]
    pub trend_ttl_days: i64,
    #[serde(default = "default_new_match_ttl_days")]
    pub new_match_ttl_days: i64,
    /// Look-back window for counting recent validated signups.
    #[serde(default = "default_recent_signup_window_days")]
    pub recent_signup_window_days: i64,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            trend_ttl_days: default_trend_ttl_days(),
            new_match_ttl_days: default_new_match_ttl_days(),
            recent_signup_window_days: default_recent_signup_window_days(),
        }
    }
}

const fn default_trend_ttl_days() -> i64 {
    7
}

const fn default_new_match_ttl_days() -> i64 {
    3
}

const fn default_recent_signup_window_days() -> i64 {
    7
}

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the root directory where portmatch stores data.
///
/// Order of precedence:
/// 1. `PORTMATCH_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("PORTMATCH_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("Portmatch"))
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(workspace_root()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<EngineConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: EngineConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(EngineConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &EngineConfig) -> Result<()> {
    let path = config_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}
