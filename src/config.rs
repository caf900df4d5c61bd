//! Configuration file support for gitnote
//!
//! Reads from .gitnote/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Indicator display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Display-related configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplayConfig {
    /// Maximum indicator label length before the note is clipped
    /// Default: 60
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_max_length() -> usize {
    60
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
        }
    }
}

impl Config {
    /// Load config from .gitnote/config.toml
    /// Returns default config if no file is found or it doesn't parse
    pub fn load(start_dir: &Path) -> Self {
        if let Some(path) = Self::find_config_path(start_dir) {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                if let Ok(config) = toml::from_str(&contents) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Find config.toml by walking up the directory tree
    fn find_config_path(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir;

        loop {
            let config_path = dir.join(".gitnote").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
        None
    }
}
