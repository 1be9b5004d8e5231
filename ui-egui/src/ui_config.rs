// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI configuration for gridmark
//!
//! Stored as TOML next to the network settings:
//!
//! ```toml
//! theme = "dark"
//!
//! [window]
//! title = "gridmark"
//! initial_size = [480.0, 560.0]
//!
//! [board]
//! dimension = 3
//! pixel_size = 360.0
//!
//! [network]
//! server_addr = "127.0.0.1:4000"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use gridmark_core::render::FontFamily;
use gridmark_core::{RenderStyle, ThemeMode};
use gridmark_network::config::{default_config_path, load_or_create};
use gridmark_network::NetworkConfig;
use serde::{Deserialize, Serialize};

/// Complete UI configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Forced theme; follows the system visuals when unset
    pub theme: Option<ThemeMode>,
    pub window: WindowConfig,
    pub board: BoardConfig,
    pub network: NetworkConfig,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial window size (width, height)
    pub initial_size: (f32, f32),
    pub min_size: (f32, f32),
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "gridmark".to_string(),
            initial_size: (480.0, 560.0),
            min_size: (240.0, 280.0),
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Cells per side
    pub dimension: usize,
    /// Largest on-screen board side in points
    pub pixel_size: f32,
    pub font_size: f32,
    pub font_family: FontFamily,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let style = RenderStyle::default();
        Self {
            dimension: 3,
            pixel_size: 360.0,
            font_size: style.font_size,
            font_family: style.font_family,
        }
    }
}

impl BoardConfig {
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            font_size: self.font_size,
            font_family: self.font_family,
        }
    }
}

impl UiConfig {
    /// Load from `path`, or from the platform config directory when `None`
    ///
    /// A missing file is created with the defaults.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf)> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };
        let config = load_or_create(&path)?;
        Ok((config, path))
    }
}
