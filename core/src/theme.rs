// SPDX-License-Identifier: MIT OR Apache-2.0

//! Theme mode and the board palette derived from it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Binary theme signal supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark strokes on a light background
    #[default]
    Light,
    /// Light strokes on a dark background
    Dark,
}

impl ThemeMode {
    /// Map a "dark mode enabled" flag to a theme mode
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme {other:?} (expected \"light\" or \"dark\")")),
        }
    }
}

/// Toolkit-independent RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::from_rgb(0, 0, 0);
    pub const RED: Rgba = Rgba::from_rgb(255, 0, 0);

    /// Opaque color from its RGB components
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Colors and stroke widths used to draw the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Grid line color
    pub grid: Rgba,
    /// Grid line width
    pub grid_width: f32,
    /// Mark glyph color
    pub mark: Rgba,
    /// Win-line highlight color
    pub win_line: Rgba,
    /// Win-line width
    pub win_line_width: f32,
}

impl Palette {
    /// Light theme: thin dark-gray grid, black marks
    pub const LIGHT: Palette = Palette {
        grid: Rgba::from_rgb(75, 85, 99),
        grid_width: 0.4,
        mark: Rgba::BLACK,
        win_line: Rgba::RED,
        win_line_width: 2.0,
    };

    /// Dark theme: lighter gray grid at full width, light-gray marks
    pub const DARK: Palette = Palette {
        grid: Rgba::from_rgb(156, 163, 175),
        grid_width: 1.0,
        mark: Rgba::from_rgb(209, 213, 219),
        win_line: Rgba::RED,
        win_line_width: 2.0,
    };

    pub fn for_theme(theme: ThemeMode) -> Self {
        match theme {
            ThemeMode::Light => Self::LIGHT,
            ThemeMode::Dark => Self::DARK,
        }
    }
}
