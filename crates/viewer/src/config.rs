//! Viewer configuration (window, vsync, seed, generator variant). Loaded from galaxy.ron at startup.

use procgen::{BurstExtent, BurstSizing, BurstSpread, JitterScaling, VariantPolicies};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Startup settings. Read from `galaxy.ron` in the current directory; never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Fixed seed for reproducible galaxies; `None` uses the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub jitter: JitterScaling,
    #[serde(default)]
    pub burst_sizing: BurstSizing,
    #[serde(default)]
    pub burst_spread: BurstSpread,
    #[serde(default)]
    pub burst_extent: BurstExtent,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_true() -> bool {
    true
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
            seed: None,
            jitter: JitterScaling::default(),
            burst_sizing: BurstSizing::default(),
            burst_spread: BurstSpread::default(),
            burst_extent: BurstExtent::default(),
        }
    }
}

impl ViewerConfig {
    /// Load config from `galaxy.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => Self::parse(&data).unwrap_or_else(|e| {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }),
            Err(_) => {
                log::info!("No config at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Generator variant selected by this config.
    pub fn policies(&self) -> VariantPolicies {
        VariantPolicies {
            jitter: self.jitter,
            burst_sizing: self.burst_sizing,
            burst_spread: self.burst_spread,
            burst_extent: self.burst_extent,
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("galaxy.ron")
}
