use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tasklist_core::FilterMode;

const CONFIG_DIR: &str = ".tasklist";
const CONFIG_FILE: &str = "config.toml";

/// Top-level project configuration loaded from `.tasklist/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub list: ListConfig,
}

impl ProjectConfig {
    /// Location of the project file below `workdir`.
    pub fn path_in(workdir: impl AsRef<Path>) -> PathBuf {
        workdir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from a known working directory. A missing file yields defaults.
    pub fn from_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let config_path = Self::path_in(workdir);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }

    /// Resolve the configuration for a session: `explicit` wins, then the working directory.
    pub fn load(explicit: Option<&Path>, workdir: impl AsRef<Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::from_workdir(workdir),
        }
    }
}

/// `[list]` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListConfig {
    /// Mode selected when a session starts.
    #[serde(default)]
    pub default_filter: FilterMode,
}
