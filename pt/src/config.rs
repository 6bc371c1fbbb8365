//! Configuration for prompttemplate

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::color::ColorMode;
use crate::icons::IconSet;
use crate::registry::HelperRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Use the unicode icon set
    #[serde(default)]
    pub fancy_icons: bool,

    /// Make the `color` helper emit nothing
    #[serde(default)]
    pub disable_color: bool,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!(?config_path, "Config::load: explicit path");
            return Self::load_file(config_path);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("prompttemplate").join("config.yml")),
            Some(PathBuf::from("prompttemplate.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                debug!(?path, "Config::load: found default config");
                return Self::load_file(path);
            }
        }

        debug!("Config::load: no config file, using defaults");
        Ok(Config::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read config: {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).context(format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    pub fn icons(&self) -> IconSet {
        IconSet::for_style(self.fancy_icons)
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::from_disabled(self.disable_color)
    }

    /// The standard helper registry for this configuration
    pub fn registry(&self) -> HelperRegistry {
        HelperRegistry::standard(&self.icons(), self.color_mode())
    }
}
