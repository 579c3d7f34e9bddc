//! User configuration.
//!
//! Loaded from `<config-dir>/git-sl/config.toml` (e.g.
//! `~/.config/git-sl/config.toml`). Every field has a default, so a
//! missing file is not an error; a malformed one is.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reference whose ancestry forms the main line.
    #[serde(default = "default_main_ref")]
    pub main_ref: String,

    /// Seeds older than this many days are hidden unless `--all`.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            main_ref: default_main_ref(),
            max_age_days: default_max_age_days(),
        }
    }
}

fn default_main_ref() -> String {
    "origin/master".to_string()
}

const fn default_max_age_days() -> u64 {
    14
}

impl Config {
    /// Load the config file if present, falling back to defaults.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// The age bound in seconds, honoring the `--all` override.
    #[must_use]
    pub const fn max_age_secs(&self, all: bool) -> Option<u64> {
        if all {
            None
        } else {
            Some(self.max_age_days * 24 * 3_600)
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("git-sl").join("config.toml"))
}
