// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Canvas` implementation on top of an egui painter

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Vec2};
use gridmark_core::render::{FontFamily, Stroke, TextStyle};
use gridmark_core::{Canvas, Point, Rgba};

/// Convert a board color to an egui color
pub fn color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn font_id(style: &TextStyle) -> FontId {
    let family = match style.family {
        FontFamily::SansSerif => egui::FontFamily::Proportional,
        FontFamily::Monospace => egui::FontFamily::Monospace,
    };
    FontId::new(style.size, family)
}

/// Draws surface-local board coordinates into a screen rect
pub struct PainterCanvas<'p> {
    painter: &'p Painter,
    origin: Pos2,
    background: Color32,
}

impl<'p> PainterCanvas<'p> {
    /// `origin` is the screen position of the surface's top-left corner
    pub fn new(painter: &'p Painter, origin: Pos2, background: Color32) -> Self {
        Self {
            painter,
            origin,
            background,
        }
    }

    fn to_screen(&self, point: Point) -> Pos2 {
        self.origin + Vec2::new(point.x, point.y)
    }
}

impl Canvas for PainterCanvas<'_> {
    fn clear(&mut self, width: f32, height: f32) {
        let rect = Rect::from_min_size(self.origin, Vec2::new(width, height));
        self.painter.rect_filled(rect, 0.0, self.background);
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(stroke.width, color32(stroke.color)),
        );
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.painter.text(
            self.to_screen(at),
            Align2::CENTER_CENTER,
            text,
            font_id(style),
            color32(style.color),
        );
    }
}
