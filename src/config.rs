//! Tool configuration: config file, then environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::config_dir;
use rulebook_core::models::OutputTarget;
use rulebook_core::StrategyKind;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "rulebook";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Taxonomy JSON file. The built-in catalog is used when unset.
    pub taxonomy_path: Option<PathBuf>,
    /// Project root that generated files are written under.
    pub output_dir: PathBuf,
    pub target: OutputTarget,
    pub strategy: StrategyKind,
    /// Fail generation when a document still contains `{{...}}` tokens.
    pub strict_placeholders: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            taxonomy_path: None,
            output_dir: PathBuf::from("."),
            target: OutputTarget::default(),
            strategy: StrategyKind::default(),
            strict_placeholders: false,
        }
    }
}

impl Config {
    /// Load the user's config file and apply environment overrides.
    /// Falls back to defaults if the file is missing or unreadable.
    pub fn load() -> Self {
        let config = match get_config_path().and_then(|path| Self::try_load(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Apply `RULEBOOK_*` overrides looked up through `var`.
    ///
    /// Unparsable values are logged and ignored.
    pub fn with_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = var("RULEBOOK_TAXONOMY") {
            self.taxonomy_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = var("RULEBOOK_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(target) = var("RULEBOOK_TARGET") {
            match target.parse::<OutputTarget>() {
                Ok(target) => self.target = target,
                Err(e) => tracing::warn!("Ignoring RULEBOOK_TARGET: {}", e),
            }
        }
        if let Some(strategy) = var("RULEBOOK_STRATEGY") {
            match strategy.parse::<StrategyKind>() {
                Ok(strategy) => self.strategy = strategy,
                Err(e) => tracing::warn!("Ignoring RULEBOOK_STRATEGY: {}", e),
            }
        }
        if let Some(strict) = var("RULEBOOK_STRICT_PLACEHOLDERS") {
            self.strict_placeholders = matches!(strict.trim(), "1" | "true" | "yes");
        }
        self
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
