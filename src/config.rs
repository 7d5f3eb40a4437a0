//! Configuration handling.
//!
//! Settings come from a `pairview.toml` file (or the file given with
//! `--config`), with command-line flags taking precedence:
//!
//! ```toml
//! [layout]
//! cell_width_px = 8      # pixels per terminal column
//! width_px = 1024        # fixed container width, overrides the terminal
//!
//! [display]
//! fancy_glyphs = false
//! show_legend = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pairview.toml";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Approximate pixel width of one terminal column
    #[serde(default = "default_cell_width_px")]
    pub cell_width_px: u16,

    /// Fixed container width in pixels, instead of measuring the terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_px: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Use Unicode glyphs for separators and markers
    #[serde(default)]
    pub fancy_glyphs: bool,

    /// Show the color legend panel on startup
    #[serde(default = "default_true")]
    pub show_legend: bool,
}

fn default_cell_width_px() -> u16 {
    8
}

fn default_true() -> bool {
    true
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_width_px: default_cell_width_px(),
            width_px: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fancy_glyphs: false,
            show_legend: true,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or `pairview.toml` if present, or defaults.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(default_path)
                } else {
                    log::info!("Using default configuration");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Loads configuration from a specific TOML file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the layout cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.layout.cell_width_px == 0 {
            return Err(ConfigError::Invalid("layout.cell_width_px must be positive".into()));
        }
        if let Some(width) = self.layout.width_px {
            if !width.is_finite() || width < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "layout.width_px must be a non-negative number (got {})",
                    width
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.layout.cell_width_px, 8);
        assert_eq!(config.layout.width_px, None);
        assert!(!config.display.fancy_glyphs);
        assert!(config.display.show_legend);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let file = write_config("[display]\nfancy_glyphs = true\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert!(config.display.fancy_glyphs);
        assert!(config.display.show_legend);
        assert_eq!(config.layout.cell_width_px, 8);
    }

    #[test]
    fn test_full_file() {
        let file = write_config(
            "[layout]\ncell_width_px = 10\nwidth_px = 1024.0\n\n[display]\nshow_legend = false\n",
        );
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.layout.cell_width_px, 10);
        assert_eq!(config.layout.width_px, Some(1024.0));
        assert!(!config.display.show_legend);
    }

    #[test]
    fn test_zero_cell_width_rejected() {
        let file = write_config("[layout]\ncell_width_px = 0\n");
        let result = Config::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_width_rejected() {
        let file = write_config("[layout]\nwidth_px = -5.0\n");
        assert!(matches!(Config::load_from_file(file.path()), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("[layout\n");
        assert!(matches!(Config::load_from_file(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/pairview.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
    }
}
