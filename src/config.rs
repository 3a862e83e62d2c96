//! Client-side settings for tree building and search.
//!
//! Settings live in a small YAML document. Every field has a default, so an
//! empty or partial file is valid:
//!
//! ```yaml
//! tree:
//!   include_child_note_counts: true
//!   sort_alphabetically: false
//! search:
//!   default_limit: 50
//! ```

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tree: TreeSettings,
    pub search: SearchSettings,
}

/// Defaults applied when building the directory tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    /// Fold descendants' notes into each directory's note count
    pub include_child_note_counts: bool,
    /// Order sibling directories by name instead of listing order
    pub sort_alphabetically: bool,
}

impl Default for TreeSettings {
    fn default() -> Self {
        TreeSettings {
            include_child_note_counts: true,
            sort_alphabetically: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Page size used when a query does not set its own limit
    pub default_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings { default_limit: 20 }
    }
}

impl Config {
    /// Parse configuration from YAML. Blank input yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}
