//! User configuration loaded from `config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::history::DISPLAY_LIMIT;
use crate::plot::{DEFAULT_SAMPLES, MAX_SAMPLES, PlotStyle};

const APP_DIR: &str = "mathmaster";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history: HistoryConfig,
    pub plot: PlotConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// How many entries the history view shows.
    pub display_limit: usize,
    /// Where `export` writes when no path is given.
    pub export_path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            display_limit: DISPLAY_LIMIT,
            export_path: PathBuf::from("math_calculations_history.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub samples: usize,
    pub start: f64,
    pub end: f64,
    /// Expression plotted when none is given.
    pub function: String,
    pub width: usize,
    pub height: usize,
    pub marker: char,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            start: -10.0,
            end: 10.0,
            function: "x**2".to_string(),
            width: PlotStyle::default().width,
            height: PlotStyle::default().height,
            marker: PlotStyle::default().marker,
        }
    }
}

impl PlotConfig {
    /// Chart style handed to the renderer.
    pub fn style(&self) -> PlotStyle {
        PlotStyle {
            width: self.width,
            height: self.height,
            marker: self.marker,
            ..PlotStyle::default()
        }
    }
}

impl Config {
    /// Default location: `$XDG_CONFIG_HOME/mathmaster/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load from `path` if given, else from the default location if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if !(2..=MAX_SAMPLES).contains(&config.plot.samples) {
            anyhow::bail!("plot.samples must be between 2 and {}", MAX_SAMPLES);
        }
        if config.history.display_limit == 0 {
            anyhow::bail!("history.display_limit must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history.display_limit, 20);
        assert_eq!(config.plot.samples, 400);
        assert_eq!(config.plot.function, "x**2");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [history]
            display_limit = 5

            [plot]
            start = -1.0
            end = 1.0
            width = 40
            marker = "o"
            "#,
        )
        .unwrap();
        assert_eq!(config.history.display_limit, 5);
        assert_eq!(
            config.history.export_path,
            PathBuf::from("math_calculations_history.txt")
        );
        assert_eq!(config.plot.start, -1.0);
        assert_eq!(config.plot.samples, 400);
        let style = config.plot.style();
        assert_eq!(style.width, 40);
        assert_eq!(style.height, 20);
        assert_eq!(style.marker, 'o');
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Config::parse("[plot]\nsamples = 1").is_err());
        assert!(Config::parse("[plot]\nsamples = 10000000000").is_err());
        assert!(Config::parse("[history]\ndisplay_limit = 0").is_err());
        assert!(Config::parse("[plot]\nstart = \"left\"").is_err());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join("mathmaster-missing-config.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
