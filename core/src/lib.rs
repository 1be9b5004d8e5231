// SPDX-License-Identifier: MIT OR Apache-2.0

//! gridmark core - board rendering and interaction for N×N grid games
//!
//! This crate provides the client-side half of a networked grid game:
//! - Board, cell and win-line representation
//! - Geometry resolution for the drawable surface
//! - Full clear-and-redraw rendering against an abstract [`render::Canvas`]
//! - Pointer-to-cell mapping and local move dispatch
//!
//! The authoritative game state (board contents, turn order, winner) lives on
//! a remote server; this crate only renders it and forwards local moves.

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod dispatch;
pub mod geometry;
pub mod input;
pub mod render;
pub mod theme;
pub mod turn;
pub mod view;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use board::Board;
pub use dispatch::{DispatchOutcome, MoveDispatcher, RejectReason, Transport, TransportError, TurnStateSink, TURN_EVENT};
pub use geometry::{Geometry, GeometryResolver, LayoutSnapshot, SurfaceLayout};
pub use input::{cell_center, map_pointer};
pub use render::{render, Canvas, DrawCommand, Point, RecordingCanvas, RenderOutcome, RenderStyle, Scene};
pub use theme::{Palette, Rgba, ThemeMode};
pub use turn::{RemoteTurn, TurnPayload, TurnState};
pub use view::{BoardProps, BoardView, ClickOutcome};

/// A board cell addressed by row (top to bottom) and column (left to right)
///
/// Serialized as a `[row, col]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct CellIndex {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
}

impl CellIndex {
    /// Create a new cell index
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if the cell lies on a board of the given size
    pub fn is_valid(&self, board_size: usize) -> bool {
        self.row < board_size && self.col < board_size
    }
}

impl From<[usize; 2]> for CellIndex {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}

impl From<CellIndex> for [usize; 2] {
    fn from(cell: CellIndex) -> Self {
        [cell.row, cell.col]
    }
}

/// Contents of a single board cell
///
/// On the wire an empty cell is `""` and a placed mark is a one-character
/// string such as `"X"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mark {
    /// Nobody has played here
    #[default]
    Empty,
    /// A player's symbol
    Player(char),
}

impl Mark {
    /// Parse the wire form of a mark
    pub fn parse(s: &str) -> Result<Self, BoardError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Mark::Empty),
            (Some(c), None) => Ok(Mark::Player(c)),
            _ => Err(BoardError::InvalidMark(s.to_string())),
        }
    }

    /// Returns true for the empty marker
    pub fn is_empty(&self) -> bool {
        matches!(self, Mark::Empty)
    }

    /// The player symbol, if any
    pub fn symbol(&self) -> Option<char> {
        match self {
            Mark::Empty => None,
            Mark::Player(c) => Some(*c),
        }
    }
}

impl TryFrom<String> for Mark {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Mark::parse(&s)
    }
}

impl From<Mark> for String {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Empty => String::new(),
            Mark::Player(c) => c.to_string(),
        }
    }
}

/// Two endpoints of a winning run (row, column or diagonal)
///
/// Serialized as `[[row, col], [row, col]]`, matching the `winIndxs` field
/// sent by the game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[CellIndex; 2]", into = "[CellIndex; 2]")]
pub struct WinLine {
    /// First endpoint
    pub start: CellIndex,
    /// Second endpoint
    pub end: CellIndex,
}

impl WinLine {
    /// Create a new win line
    pub fn new(start: CellIndex, end: CellIndex) -> Self {
        Self { start, end }
    }

    /// Check that both endpoints lie on a board of the given size
    pub fn validate(&self, board_size: usize) -> Result<(), BoardError> {
        for cell in [self.start, self.end] {
            if !cell.is_valid(board_size) {
                return Err(BoardError::OutOfBounds {
                    row: cell.row,
                    col: cell.col,
                    size: board_size,
                });
            }
        }
        Ok(())
    }
}

impl From<[CellIndex; 2]> for WinLine {
    fn from([start, end]: [CellIndex; 2]) -> Self {
        Self { start, end }
    }
}

impl From<WinLine> for [CellIndex; 2] {
    fn from(line: WinLine) -> Self {
        [line.start, line.end]
    }
}

/// Errors raised while building boards and board coordinates
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A board needs at least one row
    #[error("Board must have at least one row")]
    Empty,

    /// Every row must be as long as the board is tall
    #[error("Board is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        /// Offending row
        row: usize,
        /// Its length
        len: usize,
        /// Expected length (number of rows)
        expected: usize,
    },

    /// A cell held something other than empty or a single character
    #[error("Invalid cell mark {0:?}: expected empty or a single character")]
    InvalidMark(String),

    /// A coordinate fell outside the board
    #[error("Cell ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
        /// Board size
        size: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_wire_form() {
        assert_eq!(Mark::parse("").unwrap(), Mark::Empty);
        assert_eq!(Mark::parse("O").unwrap(), Mark::Player('O'));
        assert!(matches!(Mark::parse("XO"), Err(BoardError::InvalidMark(_))));

        let json = serde_json::to_string(&[Mark::Empty, Mark::Player('X')]).unwrap();
        assert_eq!(json, r#"["","X"]"#);
    }

    #[test]
    fn win_line_wire_form() {
        let line: WinLine = serde_json::from_str("[[0,0],[0,2]]").unwrap();
        assert_eq!(line, WinLine::new(CellIndex::new(0, 0), CellIndex::new(0, 2)));
        assert_eq!(serde_json::to_string(&line).unwrap(), "[[0,0],[0,2]]");

        assert!(serde_json::from_str::<WinLine>("[[0,0]]").is_err());
    }

    #[test]
    fn win_line_validation() {
        let line = WinLine::new(CellIndex::new(0, 0), CellIndex::new(3, 3));
        assert!(line.validate(4).is_ok());
        assert_eq!(
            line.validate(3),
            Err(BoardError::OutOfBounds { row: 3, col: 3, size: 3 })
        );
    }
}
