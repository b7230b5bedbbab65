//! Persisted tooltip defaults.
//!
//! Stores default tooltip options and placement constants as JSON at
//! `~/.local/share/hover-tip/config.json`. Missing fields fall back to their
//! defaults, so a partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::tooltip::{PlacementConfig, TooltipOptions};
use crate::Result;

/// Default config file path.
pub fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hover-tip")
        .join("config.json")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverTipConfig {
    /// Options new tooltips start from.
    #[serde(default)]
    pub defaults: TooltipOptions,
    #[serde(default)]
    pub placement: PlacementConfig,
    /// Path the config was loaded from (not serialized).
    #[serde(skip)]
    path: PathBuf,
}

impl Default for HoverTipConfig {
    fn default() -> Self {
        Self {
            defaults: TooltipOptions::default(),
            placement: PlacementConfig::default(),
            path: default_path(),
        }
    }
}

impl HoverTipConfig {
    /// Load from the default path, falling back to defaults on any error.
    pub fn load() -> Self {
        Self::load_from(&default_path())
    }

    /// Load from `path`, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        };
        config.path = path.to_path_buf();
        config
    }

    /// Parse and validate config JSON.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.defaults.validate()?;
        config.placement.validate()?;
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist to the path this config was loaded from.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }
}
