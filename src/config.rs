//! Project configuration (spriteswap.yaml).
//!
//! Every field is optional; CLI flags take precedence over the file and the
//! file over built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SwapError, Result};
use crate::extract::{OverflowPolicy, PaletteOptions, DEFAULT_MAX_COLORS, PALETTE_SIZE};
use crate::raster::MAX_SCALE;
use crate::types::{ToleranceConfig, DEFAULT_THRESHOLD, MAX_THRESHOLD};

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILENAME: &str = "spriteswap.yaml";

/// Configuration loaded from spriteswap.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Match distance for swaps (0-100).
    pub threshold: i32,

    /// Keep near-black and near-white pixels untouched.
    pub preserve_bw: bool,

    /// Distinct colours an image may have before its palette overflows.
    pub max_colors: usize,

    /// Behaviour when the palette overflows.
    pub overflow: OverflowPolicy,

    /// Integer upscale applied when saving.
    pub scale: u32,

    /// Output directory for batch recolors.
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            preserve_bw: true,
            max_colors: DEFAULT_MAX_COLORS,
            overflow: OverflowPolicy::Cap,
            scale: 1,
            output: None,
        }
    }
}

impl Config {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SwapError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load an explicit config file, or `spriteswap.yaml` from `dir` when it
    /// exists, or the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(|e| SwapError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0..=MAX_THRESHOLD).contains(&self.threshold) {
            return Err(SwapError::Config {
                message: format!("threshold {} is out of range", self.threshold),
                help: Some(format!("Use a value from 0 to {}", MAX_THRESHOLD)),
            });
        }
        if self.scale > MAX_SCALE {
            return Err(SwapError::Config {
                message: format!("scale {} is too large", self.scale),
                help: Some(format!("Use a value from 1 to {}", MAX_SCALE)),
            });
        }
        if self.max_colors == 0 {
            return Err(SwapError::Config {
                message: "max_colors must be at least 1".to_string(),
                help: None,
            });
        }
        Ok(())
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| SwapError::Config {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }

    /// Tolerance with optional overrides applied.
    pub fn tolerance(&self, threshold: Option<i32>, preserve_bw: Option<bool>) -> Result<ToleranceConfig> {
        ToleranceConfig::new(
            threshold.unwrap_or(self.threshold),
            preserve_bw.unwrap_or(self.preserve_bw),
        )
    }

    pub fn palette_options(&self) -> PaletteOptions {
        PaletteOptions {
            max_colors: self.max_colors,
            overflow: self.overflow,
            size: PALETTE_SIZE,
        }
    }

    /// Get the effective scale factor.
    pub fn effective_scale(&self) -> u32 {
        self.scale.max(1)
    }
}
