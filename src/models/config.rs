use cell_raster::{Palette, Quantizer, Strategy};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Colour mapping selected in config or on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuantizerKind {
    /// Direct 6x6x6 cube bucketing
    #[default]
    Cube,
    /// Nearest palette entry by RGB distance
    Nearest,
}

/// Where and how cells are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Full-screen, cursor-addressed drawing on the alternate screen
    #[default]
    Screen,
    /// Line-by-line output to stdout, suitable for pipes and scrollback
    Stream,
}

/// Viewer configuration loaded from a YAML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewerConfig {
    /// Colour quantization strategy
    #[serde(default)]
    pub quantizer: QuantizerKind,

    /// Let the nearest search pick palette entries 1-15
    #[serde(default)]
    pub system_colors: bool,

    /// Output mode
    #[serde(default)]
    pub mode: OutputMode,

    /// Wait for a key press after each image (screen mode)
    #[serde(default = "default_wait_for_key")]
    pub wait_for_key: bool,

    /// Fixed viewport width for stream mode
    #[serde(default)]
    pub columns: Option<u32>,

    /// Fixed viewport height for stream mode
    #[serde(default)]
    pub rows: Option<u32>,
}

fn default_wait_for_key() -> bool {
    true
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            quantizer: QuantizerKind::default(),
            system_colors: false,
            mode: OutputMode::default(),
            wait_for_key: default_wait_for_key(),
            columns: None,
            rows: None,
        }
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub quantizer: Option<QuantizerKind>,
    pub system_colors: bool,
    pub mode: Option<OutputMode>,
    pub no_wait: bool,
    pub columns: Option<u32>,
    pub rows: Option<u32>,
}

impl ViewerConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent
    /// or unusable
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    quantizer = ?config.quantizer,
                    mode = ?config.mode,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply command-line overrides in place
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(quantizer) = overrides.quantizer {
            self.quantizer = quantizer;
        }
        if overrides.system_colors {
            self.system_colors = true;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if overrides.no_wait {
            self.wait_for_key = false;
        }
        if overrides.columns.is_some() {
            self.columns = overrides.columns;
        }
        if overrides.rows.is_some() {
            self.rows = overrides.rows;
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self.quantizer {
            QuantizerKind::Cube => Strategy::Cube,
            QuantizerKind::Nearest => Strategy::Nearest {
                system_colors: self.system_colors,
            },
        }
    }

    /// Build the quantizer described by this config
    pub fn quantizer(&self) -> Quantizer {
        Quantizer::new(self.strategy(), Palette::XTERM)
    }
}
