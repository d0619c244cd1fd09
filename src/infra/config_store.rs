// ============================================================
// Layer 6 - Config Store
// ============================================================
// Saves and restores AppConfig as pretty-printed JSON, so a
// generation setup (endpoint, budgets, thresholds) can be kept
// next to the study material and reused.
//
// Missing keys fall back to their defaults, so a config file
// only needs the values it changes:
//
//   { "model": { "endpoint": "http://gpu-box:8080" } }

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::application::config::AppConfig;

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `cfg` as JSON, creating parent directories as needed
    pub fn save(&self, cfg: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write config to '{}'", self.path.display()))?;

        tracing::debug!("Saved config to '{}'", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<AppConfig> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read config from '{}'", self.path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file '{}'", self.path.display()))
    }
}
