// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board widget: an egui host for [`gridmark_core::BoardView`]

mod interaction;
mod renderer;

use egui::{Rect, Response, Sense, Ui, Vec2};
use gridmark_core::{BoardProps, BoardView, ClickOutcome, LayoutSnapshot, RenderOutcome, RenderStyle, Transport, TurnStateSink};

/// Layout of a widget rect as seen by the geometry resolver
pub fn layout_of(rect: Rect) -> LayoutSnapshot {
    LayoutSnapshot {
        width: rect.width(),
        height: rect.height(),
        left: rect.min.x,
        top: rect.min.y,
    }
}

/// Side of the square board for the space available
pub fn board_side(available: Vec2, max_side: f32) -> f32 {
    available.min_elem().min(max_side).max(0.0)
}

/// What happened to the board this frame
pub struct BoardResponse {
    pub response: Response,
    pub render: RenderOutcome,
    pub click: Option<ClickOutcome>,
}

/// Square clickable board
pub struct BoardWidget {
    view: BoardView,
    max_side: f32,
    attached: bool,
}

impl BoardWidget {
    pub fn new(style: RenderStyle, max_side: f32) -> Self {
        Self {
            view: BoardView::new().with_style(style),
            max_side,
            attached: false,
        }
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// Lay out, draw and handle clicks for one frame
    pub fn show<T, S>(&mut self, ui: &mut Ui, props: &BoardProps<'_>, transport: &mut T, sink: &mut S) -> BoardResponse
    where
        T: Transport + ?Sized,
        S: TurnStateSink + ?Sized,
    {
        let side = board_side(ui.available_size(), self.max_side);
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(side), Sense::click());

        let layout = layout_of(rect);
        if self.attached {
            if self.view.resize(&layout) {
                tracing::debug!(?rect, "Board surface resized");
            }
        } else {
            self.attached = self.view.attach(&layout).is_some();
        }

        let render = renderer::paint(ui, rect, &self.view, props);
        let click = interaction::handle_click(&response, &self.view, props, transport, sink);

        BoardResponse { response, render, click }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    #[test]
    fn layout_matches_rect() {
        let rect = Rect::from_min_size(Pos2::new(12.0, 34.0), Vec2::splat(300.0));
        let layout = layout_of(rect);
        assert_eq!((layout.left, layout.top), (12.0, 34.0));
        assert_eq!((layout.width, layout.height), (300.0, 300.0));
    }

    #[test]
    fn board_side_fits_available_space() {
        assert_eq!(board_side(Vec2::new(800.0, 500.0), 360.0), 360.0);
        assert_eq!(board_side(Vec2::new(800.0, 200.0), 360.0), 200.0);
        assert_eq!(board_side(Vec2::new(-5.0, 200.0), 360.0), 0.0);
    }
}
