// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board click handling

use egui::Response;
use gridmark_core::{BoardProps, BoardView, ClickOutcome, Point, Transport, TurnStateSink};

/// Forward a primary click on the board to the view
pub fn handle_click<T, S>(
    response: &Response,
    view: &BoardView,
    props: &BoardProps<'_>,
    transport: &mut T,
    sink: &mut S,
) -> Option<ClickOutcome>
where
    T: Transport + ?Sized,
    S: TurnStateSink + ?Sized,
{
    if !response.clicked() {
        return None;
    }
    let pos = response.interact_pointer_pos()?;
    Some(view.click(Point::new(pos.x, pos.y), props, transport, sink))
}
