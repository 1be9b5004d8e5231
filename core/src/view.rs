// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board view: geometry, rendering, input mapping and move dispatch wired
//! together in dependency order

use tracing::{debug, warn};

use crate::board::Board;
use crate::dispatch::{DispatchOutcome, MoveDispatcher, Transport, TurnStateSink};
use crate::geometry::{Geometry, GeometryResolver, SurfaceLayout};
use crate::input::map_pointer;
use crate::render::{render, Canvas, Point, RenderOutcome, RenderStyle, Scene};
use crate::theme::ThemeMode;
use crate::WinLine;

/// Authoritative state the caller passes in on every frame
#[derive(Debug, Clone, Copy)]
pub struct BoardProps<'a> {
    pub board: &'a Board,
    pub game_over: bool,
    pub win_line: Option<WinLine>,
    pub theme: ThemeMode,
}

impl<'a> BoardProps<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            game_over: false,
            win_line: None,
            theme: ThemeMode::default(),
        }
    }
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No geometry yet, the click was dropped
    NotReady,
    /// The pointer was not over a cell
    OutsideBoard,
    Dispatched(DispatchOutcome),
}

#[derive(Debug, Default, Clone)]
pub struct BoardView {
    resolver: GeometryResolver,
    dispatcher: MoveDispatcher,
    style: RenderStyle,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: MoveDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn attach<S: SurfaceLayout + ?Sized>(&mut self, surface: &S) -> Option<Geometry> {
        self.resolver.attach(surface)
    }

    /// Returns true when the geometry changed and a redraw is due
    pub fn resize<S: SurfaceLayout + ?Sized>(&mut self, surface: &S) -> bool {
        self.resolver.resize(surface)
    }

    pub fn detach(&mut self) {
        self.resolver.detach();
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.resolver.current()
    }

    /// Full clear-and-redraw of the board
    pub fn render<C: Canvas + ?Sized>(&self, props: &BoardProps<'_>, canvas: Option<&mut C>) -> RenderOutcome {
        let size = props.board.size();
        let win_line = props.win_line.filter(|line| match line.validate(size) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Dropping win line outside the board");
                false
            }
        });

        let scene = Scene {
            board: props.board,
            geometry: self.resolver.current(),
            theme: props.theme,
            win_line,
            style: self.style,
        };
        render(&scene, canvas)
    }

    /// Map a viewport-space click to a cell and try to play it
    pub fn click<T, S>(
        &self,
        pointer: Point,
        props: &BoardProps<'_>,
        transport: &mut T,
        sink: &mut S,
    ) -> ClickOutcome
    where
        T: Transport + ?Sized,
        S: TurnStateSink + ?Sized,
    {
        let Some(geometry) = self.resolver.current() else {
            debug!("Click ignored: surface geometry not resolved");
            return ClickOutcome::NotReady;
        };

        let Some(cell) = map_pointer(pointer, &geometry, props.board.size()) else {
            debug!(?pointer, "Click outside the board");
            return ClickOutcome::OutsideBoard;
        };

        ClickOutcome::Dispatched(self.dispatcher.dispatch(
            cell,
            props.board,
            props.game_over,
            transport,
            sink,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LayoutSnapshot;
    use crate::render::RecordingCanvas;
    use crate::turn::TurnState;
    use crate::{CellIndex, TransportError};
    use serde_json::Value;

    struct NullTransport(usize);

    impl Transport for NullTransport {
        fn emit(&mut self, _event: &str, _payload: Value) -> Result<(), TransportError> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn click_before_attach_is_dropped() {
        let board = Board::new(3);
        let view = BoardView::new();
        let mut transport = NullTransport(0);
        let outcome = view.click(
            Point::new(10.0, 10.0),
            &BoardProps::new(&board),
            &mut transport,
            &mut |_: TurnState| {},
        );
        assert_eq!(outcome, ClickOutcome::NotReady);
        assert_eq!(transport.0, 0);
    }

    #[test]
    fn click_outside_board() {
        let board = Board::new(3);
        let mut view = BoardView::new();
        view.attach(&LayoutSnapshot {
            width: 300.0,
            height: 300.0,
            left: 0.0,
            top: 0.0,
        });
        let mut transport = NullTransport(0);
        let outcome = view.click(
            Point::new(310.0, 10.0),
            &BoardProps::new(&board),
            &mut transport,
            &mut |_: TurnState| {},
        );
        assert_eq!(outcome, ClickOutcome::OutsideBoard);
    }

    #[test]
    fn out_of_range_win_line_is_not_drawn() {
        let board = Board::new(3);
        let mut view = BoardView::new();
        view.attach(&LayoutSnapshot {
            width: 300.0,
            height: 300.0,
            left: 0.0,
            top: 0.0,
        });
        let props = BoardProps {
            win_line: Some(WinLine::new(CellIndex::new(0, 0), CellIndex::new(0, 5))),
            ..BoardProps::new(&board)
        };
        let mut canvas = RecordingCanvas::new();
        assert_eq!(view.render(&props, Some(&mut canvas)), RenderOutcome::Drawn);
        assert_eq!(canvas.lines().count(), 4);
    }

    #[test]
    fn render_after_detach_skips() {
        let board = Board::new(3);
        let mut view = BoardView::new();
        view.attach(&LayoutSnapshot {
            width: 300.0,
            height: 300.0,
            left: 0.0,
            top: 0.0,
        });
        view.detach();
        let mut canvas = RecordingCanvas::new();
        assert!(matches!(
            view.render(&BoardProps::new(&board), Some(&mut canvas)),
            RenderOutcome::Skipped(_)
        ));
    }
}
