use reportcraft_editor::DEFAULT_MAX_ENTRIES;
use reportcraft_parser::ast::{DEFAULT_MAX_SUB_SECTIONS, DEFAULT_MIN_SECTIONS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "reportcraft.config.json";

/// Reportcraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Expected minimum number of top-level sections
    #[serde(default = "default_min_sections")]
    pub min_sections: usize,

    /// Depth ceiling for outlines (0 = top-level only)
    #[serde(default = "default_max_sub_sections")]
    pub max_sub_sections_per_section: usize,

    /// Undo snapshots kept per project
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Spaces per level when printing outlines as text
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_min_sections() -> usize {
    DEFAULT_MIN_SECTIONS
}

fn default_max_sub_sections() -> usize {
    DEFAULT_MAX_SUB_SECTIONS
}

fn default_history_limit() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_indent() -> usize {
    2
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!("loaded {}", config_path.display());
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Indentation string for outline text
    pub fn indent_string(&self) -> String {
        " ".repeat(self.indent.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_sections: default_min_sections(),
            max_sub_sections_per_section: default_max_sub_sections(),
            history_limit: default_history_limit(),
            indent: default_indent(),
        }
    }
}
