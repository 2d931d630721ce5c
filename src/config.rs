//! Editor defaults, read from an optional TOML file.
//!
//! ```toml
//! default_width = 48
//! default_height = 32
//! log_level = "debug"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Size used by `new` when no `--width` is given.
    pub default_width: u16,
    pub default_height: u16,
    /// `flexi_logger` spec string, e.g. `"info"` or `"ray_map_editor=debug"`.
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_width: 32,
            default_height: 32,
            log_level: "info".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).with_context(|| "Parsing editor config")
    }

    /// Defaults when `path` is `None`; an explicit path must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Loading {}", path.display()))
    }
}
