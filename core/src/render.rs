// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board rendering
//!
//! [`render`] is a pure function of its [`Scene`]: every call clears the
//! surface and redraws grid, marks and win line from scratch. Hosts call it
//! whenever the board, win line, geometry or theme changes.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::Board;
use crate::geometry::Geometry;
use crate::input::cell_center;
use crate::theme::{Palette, Rgba, ThemeMode};
use crate::WinLine;

/// A position in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Line stroke parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Rgba,
}

impl Stroke {
    pub const fn new(width: f32, color: Rgba) -> Self {
        Self { width, color }
    }
}

/// Font family for mark glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    SansSerif,
    Monospace,
}

/// Text parameters for a mark glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Glyph size in pixels
    pub size: f32,
    pub family: FontFamily,
    pub color: Rgba,
}

/// Theme-independent rendering knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Mark glyph size in pixels
    pub font_size: f32,
    pub font_family: FontFamily,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            font_size: 24.0,
            font_family: FontFamily::SansSerif,
        }
    }
}

/// Drawing context for the board surface
///
/// Coordinates are surface-local pixels with the origin at the top-left
/// corner.
pub trait Canvas {
    /// Erase the whole drawable area
    fn clear(&mut self, width: f32, height: f32);

    /// Stroke a straight segment
    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Fill text whose box is centered on `at` both horizontally and
    /// vertically
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn clear(&mut self, width: f32, height: f32) {
        (**self).clear(width, height)
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        (**self).stroke_line(from, to, stroke)
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        (**self).fill_text(text, at, style)
    }
}

/// Everything a frame depends on
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub board: &'a Board,
    pub geometry: Option<Geometry>,
    pub theme: ThemeMode,
    pub win_line: Option<WinLine>,
    pub style: RenderStyle,
}

/// Why a render call drew nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The surface has not been measured yet
    NoGeometry,
    /// The host has no drawing context
    NoCanvas,
}

/// Result of a render call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn,
    Skipped(SkipReason),
}

/// Clear the canvas and redraw the whole board
///
/// Skips without touching the canvas when geometry or canvas is missing.
pub fn render<C: Canvas + ?Sized>(scene: &Scene<'_>, canvas: Option<&mut C>) -> RenderOutcome {
    let Some(geometry) = scene.geometry else {
        debug!("Render skipped: surface geometry not resolved");
        return RenderOutcome::Skipped(SkipReason::NoGeometry);
    };
    let Some(canvas) = canvas else {
        debug!("Render skipped: no drawing context");
        return RenderOutcome::Skipped(SkipReason::NoCanvas);
    };

    let palette = Palette::for_theme(scene.theme);
    let size = scene.board.size();

    canvas.clear(geometry.width, geometry.height);
    draw_grid(canvas, &geometry, size, &palette);
    draw_marks(canvas, &geometry, scene.board, &palette, &scene.style);

    // Drawn last so grid and marks never cover it
    if let Some(line) = scene.win_line {
        draw_win_line(canvas, &geometry, size, line, &palette);
    }

    trace!(size, theme = %scene.theme, "Board rendered");
    RenderOutcome::Drawn
}

/// N-1 interior lines per axis, no outer border
fn draw_grid<C: Canvas + ?Sized>(canvas: &mut C, geometry: &Geometry, size: usize, palette: &Palette) {
    let n = size as f32;
    let cell_width = geometry.width / n;
    let cell_height = geometry.height / n;
    let stroke = Stroke::new(palette.grid_width, palette.grid);

    for i in 1..size {
        let x = cell_width * i as f32;
        canvas.stroke_line(Point::new(x, 0.0), Point::new(x, geometry.height), stroke);

        let y = cell_height * i as f32;
        canvas.stroke_line(Point::new(0.0, y), Point::new(geometry.width, y), stroke);
    }
}

fn draw_marks<C: Canvas + ?Sized>(
    canvas: &mut C,
    geometry: &Geometry,
    board: &Board,
    palette: &Palette,
    style: &RenderStyle,
) {
    let text_style = TextStyle {
        size: style.font_size,
        family: style.font_family,
        color: palette.mark,
    };
    let mut buf = [0u8; 4];

    for (cell, mark) in board.marks() {
        let Some(symbol) = mark.symbol() else {
            continue;
        };
        let at = cell_center(cell, geometry, board.size());
        canvas.fill_text(symbol.encode_utf8(&mut buf), at, &text_style);
    }
}

fn draw_win_line<C: Canvas + ?Sized>(
    canvas: &mut C,
    geometry: &Geometry,
    size: usize,
    line: WinLine,
    palette: &Palette,
) {
    let from = cell_center(line.start, geometry, size);
    let to = cell_center(line.end, geometry, size);
    canvas.stroke_line(from, to, Stroke::new(palette.win_line_width, palette.win_line));
}

/// One recorded draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Line { from: Point, to: Point, stroke: Stroke },
    Text { text: String, at: Point, style: TextStyle },
}

/// Canvas that records draw operations instead of rasterizing them
///
/// Clearing discards everything recorded so far, so [`commands`] always
/// describes the current frame in paint order.
///
/// [`commands`]: RecordingCanvas::commands
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations of the current frame in paint order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Line segments of the current frame in paint order
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, Stroke)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, stroke } => Some((*from, *to, *stroke)),
            _ => None,
        })
    }

    /// Text glyphs of the current frame in paint order
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, TextStyle)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, at, style } => Some((text.as_str(), *at, *style)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style: *style,
        });
    }
}
