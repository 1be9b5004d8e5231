// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board painting

use egui::{Rect, Ui};
use gridmark_core::{BoardProps, BoardView, RenderOutcome};
use tracing::trace;

use crate::canvas::PainterCanvas;
use crate::theme::board_background;

/// Paint the board into `rect` with the view's current geometry
pub fn paint(ui: &Ui, rect: Rect, view: &BoardView, props: &BoardProps<'_>) -> RenderOutcome {
    let painter = ui.painter_at(rect);
    let mut canvas = PainterCanvas::new(&painter, rect.min, board_background(ui.visuals()));
    let outcome = view.render(props, Some(&mut canvas));
    trace!(?outcome, "Board painted");
    outcome
}
