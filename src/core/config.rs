//! Engine configuration
//!
//! Every field has a default, so a missing or empty TOML file yields a
//! working setup. The config value is passed explicitly to whatever needs it.

use crate::core::error::{BoostError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "boosts.toml";

/// Configuration shared by the evaluator and the maintenance tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Catalog file read by the evaluator and rewritten by the patcher
    pub catalog_path: PathBuf,

    /// Tracing filter directive used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Indent for fields the patcher inserts into a multi-line record whose
    /// neighbouring field shares a line with the opening brace
    pub field_indent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("cards.js"),
            log_filter: "card_boosts=info".to_string(),
            field_indent: "    ".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate().map_err(BoostError::InvalidConfig)?;
        Ok(config)
    }

    /// Load `path` when given, else `boosts.toml` if present, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err("catalog_path must not be empty".into());
        }

        if !self.field_indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(format!(
                "field_indent ({:?}) may only contain spaces and tabs",
                self.field_indent
            ));
        }

        Ok(())
    }
}
